//! 命令行参数
//!
//! 参数覆盖设置文件中的对应项

use anyhow::{bail, Context, Result};
use divide_ai::{Algorithm, SearchDepth};
use protocol::Player;

use crate::settings::Settings;

/// 把命令行参数应用到设置上
///
/// 支持: `<起始数字>` `--minimax` `--alpha-beta` `--first <1|2>` `--depth <n>` `--dot`
/// `--human <1|2>` `--list`
pub fn apply_args<I, S>(mut settings: Settings, args: I) -> Result<Settings>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--minimax" => settings.game.ai.algorithm = Algorithm::Minimax,
            "--alpha-beta" => settings.game.ai.algorithm = Algorithm::AlphaBeta,
            "--dot" => settings.emit_dot = true,
            "--list" => settings.list_records = true,
            "--first" => {
                let value = args.next().context("--first 需要玩家编号")?;
                settings.game.starting_player = parse_player(value.as_ref())?;
            }
            "--human" => {
                let value = args.next().context("--human 需要玩家编号")?;
                settings.human = Some(parse_player(value.as_ref())?);
            }
            "--depth" => {
                let value = args.next().context("--depth 需要层数")?;
                let value = value.as_ref();
                settings.game.ai.depth = if value == "full" {
                    SearchDepth::Full
                } else {
                    SearchDepth::Fixed(
                        value
                            .parse()
                            .with_context(|| format!("无效的层数: {}", value))?,
                    )
                };
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            number => {
                settings.starting_number = number
                    .parse()
                    .with_context(|| format!("无效的起始数字: {}", number))?;
            }
        }
    }

    Ok(settings)
}

fn parse_player(value: &str) -> Result<Player> {
    let id: u8 = value
        .parse()
        .with_context(|| format!("无效的玩家编号: {}", value))?;
    Ok(Player::try_from(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_keeps_settings() {
        let settings = apply_args(Settings::default(), Vec::<String>::new()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_all_options() {
        let settings = apply_args(
            Settings::default(),
            ["27648", "--alpha-beta", "--first", "2", "--depth", "5", "--dot"],
        )
        .unwrap();

        assert_eq!(settings.starting_number, 27648);
        assert_eq!(settings.game.ai.algorithm, Algorithm::AlphaBeta);
        assert_eq!(settings.game.starting_player, Player::Two);
        assert_eq!(settings.game.ai.depth, SearchDepth::Fixed(5));
        assert!(settings.emit_dot);
    }

    #[test]
    fn test_full_depth() {
        let mut base = Settings::default();
        base.game.ai.depth = SearchDepth::Fixed(2);

        let settings = apply_args(base, ["--depth", "full"]).unwrap();
        assert_eq!(settings.game.ai.depth, SearchDepth::Full);
    }

    #[test]
    fn test_invalid_args() {
        assert!(apply_args(Settings::default(), ["abc"]).is_err());
        assert!(apply_args(Settings::default(), ["--first", "3"]).is_err());
        assert!(apply_args(Settings::default(), ["--first"]).is_err());
        assert!(apply_args(Settings::default(), ["--unknown"]).is_err());
        assert!(apply_args(Settings::default(), ["--human"]).is_err());
        assert!(apply_args(Settings::default(), ["--human", "0"]).is_err());
    }

    #[test]
    fn test_human_and_list() {
        let settings = apply_args(Settings::default(), ["--human", "2", "--list"]).unwrap();

        assert_eq!(settings.human, Some(Player::Two));
        assert!(settings.list_records);
        assert_eq!(settings.game.starting_player, Player::One);
    }
}

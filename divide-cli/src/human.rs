//! 人类玩家输入
//!
//! 逐行读取除数，非法输入提示后重新读取

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use divide_ai::DivideGame;

/// 读取一个合法除数并为当前走子方走一步，返回所用除数
///
/// 输入结束时返回错误。
pub fn play_human<R, W>(game: &mut DivideGame, input: &mut R, output: &mut W) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    let divisors = game.legal_divisors()?;
    let mut line = String::new();

    loop {
        write!(
            output,
            "玩家 {} 请选择除数 {:?}: ",
            game.state().actual_player(),
            divisors
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("读取输入失败")? == 0 {
            bail!("输入已结束");
        }

        let divisor = match line.trim().parse::<u32>() {
            Ok(divisor) => divisor,
            Err(_) => {
                writeln!(output, "无效输入: {}", line.trim())?;
                continue;
            }
        };

        match game.play(divisor) {
            Ok(_) => return Ok(divisor),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divide_ai::GameConfig;
    use protocol::{Player, State};
    use std::io::Cursor;

    #[test]
    fn test_retries_until_legal() {
        let mut game = DivideGame::new(24, GameConfig::default()).unwrap();
        let mut input = Cursor::new("abc\n5\n3\n");
        let mut output = Vec::new();

        let divisor = play_human(&mut game, &mut input, &mut output).unwrap();
        assert_eq!(divisor, 3);
        assert_eq!(game.state(), State::new(8, -1, 0, 0, Player::Two));
        assert_eq!(game.record().moves.len(), 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("无效输入: abc"));
        assert!(text.contains("[2, 3, 4]"));
    }

    #[test]
    fn test_end_of_input() {
        let mut game = DivideGame::new(24, GameConfig::default()).unwrap();
        let mut input = Cursor::new("7\n");
        let mut output = Vec::new();

        assert!(play_human(&mut game, &mut input, &mut output).is_err());
        assert_eq!(game.state(), State::new(24, 0, 0, 0, Player::One));
    }
}

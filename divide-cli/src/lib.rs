//! "Divide Me!" 命令行工具
//!
//! 包含:
//! - 设置加载与命令行参数
//! - 对局记录存储
//! - 人类玩家输入
//! - 计分板输出

pub mod args;
pub mod human;
pub mod settings;
pub mod storage;

pub use args::apply_args;
pub use human::play_human;
pub use settings::Settings;
pub use storage::{RecordStore, SavedRecordInfo};

use protocol::{GameResult, State};

/// 计分板文本
pub fn scoreboard(state: &State) -> String {
    format!(
        "当前数字: {:>6} | 玩家 1: {:>3} | 玩家 2: {:>3} | 银行: {:>2} | 轮到玩家 {}",
        state.actual_number(),
        state.points_player1(),
        state.points_player2(),
        state.bank(),
        state.actual_player()
    )
}

/// 记录列表中的一行
pub fn record_summary(info: &SavedRecordInfo) -> String {
    let result = match info.result {
        Some(GameResult::PlayerOneWin) => "玩家 1 获胜",
        Some(GameResult::PlayerTwoWin) => "玩家 2 获胜",
        Some(GameResult::Draw) => "平局",
        None => "未完成",
    };
    format!(
        "{} | 起始 {} | {} 步 | {}",
        info.record_id, info.starting_number, info.move_count, result
    )
}

//! "Divide Me!" 共享协议库
//!
//! 包含:
//! - 玩家与游戏状态
//! - 走子规则（合法除数、状态转移、终局判断）
//! - 错误类型
//! - 对局记录格式 (JSON)

mod constants;
mod error;
mod player;
mod record;
mod state;

pub use constants::*;
pub use error::{GameError, Result};
pub use player::Player;
pub use record::{GameMetadata, GameRecord, MoveRecord, RECORD_VERSION};
pub use state::{GameResult, State};

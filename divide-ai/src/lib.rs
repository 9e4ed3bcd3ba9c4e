//! "Divide Me!" AI 引擎
//!
//! 包含:
//! - 去重状态图及其生成
//! - 局面评估函数
//! - Minimax 与 Alpha-Beta 搜索
//! - 路径重建与深度查询
//! - 对局接口

mod builder;
mod evaluate;
mod game;
mod graph;
mod path;
mod search;

pub use builder::generate_graph;
pub use evaluate::Evaluator;
pub use game::{advance, best_move, children_of, new_game, DivideGame, GameConfig};
pub use graph::{Edge, NodeId, StateGraph};
pub use path::{get_depth, get_path};
pub use search::{alpha_beta, minimax, AiConfig, AiEngine, Algorithm, SearchDepth};

//! 错误类型定义

use thiserror::Error;

use crate::state::State;

/// 游戏规则与状态图错误
///
/// 均为调用方的前置条件错误，不可重试
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 状态图中没有与之值相等的节点
    #[error("State not found in graph: {state}")]
    NodeNotFound { state: State },

    /// 当前状态没有该除数对应的走法
    #[error("Illegal divisor {divisor} for number {number}")]
    IllegalDivisor { number: u32, divisor: u32 },

    /// 起始数字必须为正
    #[error("Invalid starting number: {number}")]
    InvalidStartingNumber { number: u32 },

    /// 玩家编号只能是 1 或 2
    #[error("Invalid player id: {id}")]
    InvalidPlayer { id: u8 },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 游戏操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;

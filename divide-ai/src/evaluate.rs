//! 局面评估函数

use protocol::{Player, State};

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估局面（一号玩家视角，正值对一号玩家有利）
    pub fn evaluate(state: &State) -> i32 {
        state.points_player1() - state.points_player2()
    }

    /// 从指定玩家视角评估
    pub fn evaluate_for(state: &State, player: Player) -> i32 {
        match player {
            Player::One => Self::evaluate(state),
            Player::Two => -Self::evaluate(state),
        }
    }
}

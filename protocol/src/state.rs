//! 游戏状态与走子规则

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BANK_MULTIPLE, DIVISORS, TERMINAL_THRESHOLD};
use crate::error::{GameError, Result};
use crate::player::Player;

/// 游戏状态
///
/// 不可变值类型：五个字段全部相等即视为同一状态，
/// 状态图以此作为去重键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// 当前待除的数字（恒为正）
    actual_number: u32,
    /// 一号玩家得分
    points_player1: i32,
    /// 二号玩家得分
    points_player2: i32,
    /// 银行计数
    bank: u32,
    /// 下一步走子的玩家
    actual_player: Player,
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 一号玩家胜
    PlayerOneWin,
    /// 平局
    Draw,
    /// 二号玩家胜
    PlayerTwoWin,
}

impl State {
    /// 创建状态
    pub fn new(
        actual_number: u32,
        points_player1: i32,
        points_player2: i32,
        bank: u32,
        actual_player: Player,
    ) -> Self {
        Self {
            actual_number,
            points_player1,
            points_player2,
            bank,
            actual_player,
        }
    }

    /// 创建开局状态（双方零分，银行为空）
    pub fn initial(starting_number: u32, starting_player: Player) -> Result<Self> {
        if starting_number == 0 {
            return Err(GameError::InvalidStartingNumber {
                number: starting_number,
            });
        }
        Ok(Self::new(starting_number, 0, 0, 0, starting_player))
    }

    pub fn actual_number(&self) -> u32 {
        self.actual_number
    }

    pub fn points_player1(&self) -> i32 {
        self.points_player1
    }

    pub fn points_player2(&self) -> i32 {
        self.points_player2
    }

    pub fn bank(&self) -> u32 {
        self.bank
    }

    pub fn actual_player(&self) -> Player {
        self.actual_player
    }

    /// 获取指定玩家的得分
    pub fn points(&self, player: Player) -> i32 {
        match player {
            Player::One => self.points_player1,
            Player::Two => self.points_player2,
        }
    }

    /// 是否为终局状态
    pub fn is_terminal(&self) -> bool {
        self.actual_number <= TERMINAL_THRESHOLD
    }

    /// 能整除当前数字的除数，按 2、3、4 升序
    ///
    /// 不考虑终局阈值，终局判断由调用方负责
    pub fn possible_actions(&self) -> Vec<u32> {
        DIVISORS
            .iter()
            .copied()
            .filter(|d| self.actual_number % d == 0)
            .collect()
    }

    /// 执行一次除法，返回新状态（不修改自身）
    ///
    /// 走子方的得分在新数字为偶数时减一，为奇数时加一；
    /// 新数字为 5 的倍数时银行加一。
    /// 除数不属于 2、3、4 或不能整除当前数字时返回 IllegalDivisor。
    pub fn apply_action(&self, divisor: u32) -> Result<State> {
        if !DIVISORS.contains(&divisor) || self.actual_number % divisor != 0 {
            return Err(GameError::IllegalDivisor {
                number: self.actual_number,
                divisor,
            });
        }
        Ok(self.divide(divisor))
    }

    /// 所有合法走法及其结果，按除数升序
    pub fn successors(&self) -> Vec<(u32, State)> {
        self.possible_actions()
            .into_iter()
            .map(|divisor| (divisor, self.divide(divisor)))
            .collect()
    }

    /// 除数已确认合法
    fn divide(&self, divisor: u32) -> State {
        let new_number = self.actual_number / divisor;
        let new_bank = if new_number % BANK_MULTIPLE == 0 {
            self.bank + 1
        } else {
            self.bank
        };
        let delta = if new_number % 2 == 0 { -1 } else { 1 };

        let (points_player1, points_player2) = match self.actual_player {
            Player::One => (self.points_player1 + delta, self.points_player2),
            Player::Two => (self.points_player1, self.points_player2 + delta),
        };

        State {
            actual_number: new_number,
            points_player1,
            points_player2,
            bank: new_bank,
            actual_player: self.actual_player.opponent(),
        }
    }

    /// 按当前得分判定胜负
    ///
    /// 只在无路可走时有意义；数字大于阈值但不能被任何除数整除时同样结束
    pub fn result(&self) -> GameResult {
        match self.points_player1.cmp(&self.points_player2) {
            Ordering::Greater => GameResult::PlayerOneWin,
            Ordering::Equal => GameResult::Draw,
            Ordering::Less => GameResult::PlayerTwoWin,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State({}, {}, {}, {}, {})",
            self.actual_number,
            self.points_player1,
            self.points_player2,
            self.bank,
            self.actual_player
        )
    }
}

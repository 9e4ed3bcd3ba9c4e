//! 对局记录格式
//!
//! 以 JSON 保存一局游戏的起始数字与每一步除法

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::state::GameResult;

/// 记录格式版本
pub const RECORD_VERSION: &str = "1.0";

/// 对局元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 对局日期
    pub date: String,
    /// 起始数字
    pub starting_number: u32,
    /// 先手玩家
    pub starting_player: Player,
    /// 电脑使用的搜索算法
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// 对局结果
    pub result: Option<GameResult>,
}

/// 单步记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 走子玩家
    pub player: Player,
    /// 使用的除数
    pub divisor: u32,
    /// 除法之后的数字
    pub number_after: u32,
}

impl MoveRecord {
    pub fn new(player: Player, divisor: u32, number_after: u32) -> Self {
        Self {
            player,
            divisor,
            number_after,
        }
    }
}

/// 完整的对局记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的对局记录
    pub fn new(starting_number: u32, starting_player: Player) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                date: Utc::now().format("%Y-%m-%d").to_string(),
                starting_number,
                starting_player,
                algorithm: None,
                result: None,
            },
            moves: Vec::new(),
        }
    }

    /// 设置搜索算法名称
    pub fn set_algorithm(&mut self, algorithm: &str) {
        self.metadata.algorithm = Some(algorithm.to_string());
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置对局结果
    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 生成便于阅读的文本格式
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "起始数字: {} (玩家 {} 先手)\n",
            self.metadata.starting_number, self.metadata.starting_player
        ));

        for (i, mv) in self.moves.iter().enumerate() {
            output.push_str(&format!(
                "{}. 玩家 {} 除以 {} -> {}\n",
                i + 1,
                mv.player,
                mv.divisor,
                mv.number_after
            ));
        }

        if let Some(ref result) = self.metadata.result {
            output.push_str(&format!("结果: {:?}\n", result));
        }

        output
    }
}

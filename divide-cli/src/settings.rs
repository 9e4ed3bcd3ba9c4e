//! 程序设置
//!
//! 从配置目录下的 settings.json 读取，缺失或无效时使用默认值

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use divide_ai::GameConfig;
use protocol::Player;
use serde::{Deserialize, Serialize};

/// 默认起始数字（2、3、4 的公倍数）
pub const DEFAULT_STARTING_NUMBER: u32 = 24000;

/// 程序设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 对局配置
    pub game: GameConfig,
    /// 起始数字
    pub starting_number: u32,
    /// 是否输出 DOT 格式的状态图
    pub emit_dot: bool,
    /// 对局记录目录，未设置时使用数据目录
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_dir: Option<PathBuf>,
    /// 由人操作的玩家，未设置时双方都由电脑走子
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human: Option<Player>,
    /// 只列出已保存的对局记录（仅命令行）
    #[serde(skip)]
    pub list_records: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            starting_number: DEFAULT_STARTING_NUMBER,
            emit_dot: false,
            record_dir: None,
            human: None,
            list_records: false,
        }
    }
}

impl Settings {
    /// 设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("divide-me");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载，首次运行时写入默认设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };
        Self::load_or_init(&path)
    }

    /// 文件存在时加载，否则把默认设置写入该文件
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }

        let settings = Self::default();
        if let Err(e) = settings.save_to(path) {
            tracing::warn!("无法写入默认设置: {:#}", e);
        }
        settings
    }

    /// 从指定文件加载
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("已加载设置: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("设置文件格式无效: {}，使用默认设置", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取设置文件: {}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 保存到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }
}

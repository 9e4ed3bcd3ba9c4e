//! 对局记录存储
//!
//! 以 JSON 文件保存和加载对局记录

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use protocol::{GameRecord, GameResult};

/// 记录存储
pub struct RecordStore {
    records_dir: PathBuf,
}

/// 保存的记录信息
#[derive(Debug, Clone)]
pub struct SavedRecordInfo {
    /// 记录 ID（文件名）
    pub record_id: String,
    /// 起始数字
    pub starting_number: u32,
    /// 走法数量
    pub move_count: usize,
    /// 结果
    pub result: Option<GameResult>,
}

impl RecordStore {
    /// 在默认数据目录下创建
    pub fn new() -> Result<Self> {
        Self::open(default_records_directory()?)
    }

    /// 在指定目录下创建，目录不存在时自动创建
    pub fn open(records_dir: impl Into<PathBuf>) -> Result<Self> {
        let records_dir = records_dir.into();
        if !records_dir.exists() {
            fs::create_dir_all(&records_dir)
                .with_context(|| format!("无法创建记录目录: {:?}", records_dir))?;
        }
        Ok(Self { records_dir })
    }

    /// 保存记录，返回文件名
    pub fn save(&self, record: &GameRecord) -> Result<String> {
        let filename = generate_filename(&Utc::now(), record.metadata.starting_number);
        let filepath = self.records_dir.join(&filename);

        let json_content = record.to_json().context("序列化对局记录失败")?;
        fs::write(&filepath, json_content)
            .with_context(|| format!("写入文件失败: {:?}", filepath))?;

        Ok(filename)
    }

    /// 加载记录
    pub fn load(&self, record_id: &str) -> Result<GameRecord> {
        let filepath = self.records_dir.join(record_id);
        if !filepath.exists() {
            anyhow::bail!("记录文件不存在: {}", record_id);
        }

        let content = fs::read_to_string(&filepath)
            .with_context(|| format!("读取文件失败: {:?}", filepath))?;

        GameRecord::from_json(&content).context("解析记录文件失败")
    }

    /// 列出所有记录，按文件名倒序（最新在前）
    pub fn list(&self) -> Result<Vec<SavedRecordInfo>> {
        let mut records = Vec::new();

        let entries = fs::read_dir(&self.records_dir)
            .with_context(|| format!("读取记录目录失败: {:?}", self.records_dir))?;

        for entry in entries {
            let path = entry.context("读取目录项失败")?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.load(filename) {
                Ok(record) => records.push(SavedRecordInfo {
                    record_id: filename.to_string(),
                    starting_number: record.metadata.starting_number,
                    move_count: record.moves.len(),
                    result: record.metadata.result,
                }),
                Err(e) => {
                    tracing::warn!("跳过损坏的记录 {}: {:#}", filename, e);
                }
            }
        }

        records.sort_by(|a, b| b.record_id.cmp(&a.record_id));
        Ok(records)
    }

    /// 获取记录目录路径
    pub fn records_directory(&self) -> &Path {
        &self.records_dir
    }
}

/// 默认记录目录
pub fn default_records_directory() -> Result<PathBuf> {
    let app_data_dir = dirs::data_dir().context("无法获取应用数据目录")?;
    Ok(app_data_dir.join("divide-me").join("records"))
}

/// 生成文件名
fn generate_filename(timestamp: &DateTime<Utc>, starting_number: u32) -> String {
    format!(
        "{}_{}.json",
        timestamp.format("%Y%m%d_%H%M%S%.3f"),
        starting_number
    )
}

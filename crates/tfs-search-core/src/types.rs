//! 公共类型（对外暴露）
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条命中记录（对应 CSV 的一行，字段顺序即列顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchRecord {
    pub project: String,
    pub file_name: String,
    pub server_path: String,
    /// 本地工作区路径；找不到映射时为空串
    pub local_path: String,
    /// 签入时间；服务端未提供时为空
    pub last_modified: Option<DateTime<Utc>>,
    /// 从 1 开始的行号
    pub line_number: usize,
    pub matched_text: String,
}

/// 服务器上的团队项目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// 项目根路径，形如 `$/Name`
    pub server_root: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let server_root = format!("$/{name}");
        Self { name, server_root }
    }
}

/// 版本控制条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    File,
    Folder,
}

/// 版本控制条目（文件或目录）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub server_path: String,
    pub content_length: u64,
    pub item_type: ItemType,
    pub checkin_date: Option<DateTime<Utc>>,
}

impl Item {
    /// 服务器路径的最后一段
    pub fn file_name(&self) -> &str {
        self.server_path.rsplit('/').next().unwrap_or(&self.server_path)
    }
}

/// 工作区中的单个映射目录
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkingFolder {
    pub server_item: String,
    pub local_item: String,
}

/// 本机工作区
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub name: String,
    pub owner: String,
    pub computer: String,
    #[serde(default)]
    pub folders: Vec<WorkingFolder>,
}

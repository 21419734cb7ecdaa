//! 版本控制服务端协作接口
use std::io::Read;

use crate::types::{Item, Project, Workspace};

/// 服务端错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{status}: {}", extract_error_message(body))]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// 从服务端错误响应体中提取 `message` 字段
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = v["message"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = v["error"]["message"].as_str() {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.chars().count() > 200 {
        format!("{}...", trimmed.chars().take(200).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

/// 版本控制服务端（所有调用均为阻塞调用）
pub trait VersionControl {
    /// 认证并返回当前授权用户名
    fn authenticate(&self) -> Result<String, ClientError>;

    /// 按服务器枚举顺序列出全部团队项目
    fn list_projects(&self, include_deleted: bool) -> Result<Vec<Project>, ClientError>;

    /// 列出匹配 `path_glob`（`$/Proj/*.cs` 形式）的条目
    fn list_items(&self, path_glob: &str, recursive: bool) -> Result<Vec<Item>, ClientError>;

    /// 下载条目当前版本的内容
    fn download(&self, item: &Item) -> Result<Box<dyn Read>, ClientError>;

    /// 查询某用户在某台机器上的工作区
    fn query_workspaces(&self, owner: &str, machine: &str) -> Result<Vec<Workspace>, ClientError>;
}

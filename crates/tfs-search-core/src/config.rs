//! 连接配置加载（TOML）
//!
//! 查找顺序：环境变量 `TFS_SEARCH_CONFIG` → `<配置目录>/tfs-search/config.toml`；
//! 文件不存在时使用默认值。
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::Workspace;

pub const CONFIG_ENV: &str = "TFS_SEARCH_CONFIG";
pub const PAT_ENV: &str = "TFS_SEARCH_PAT";

fn default_collection_url() -> String {
    "http://{server}:8080/tfs/DefaultCollection".to_string()
}

fn default_api_version() -> String {
    "5.0".to_string()
}

/// 连接配置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// 集合 URL 模板，`{server}` 会被替换为 /T 指定的服务器名
    #[serde(default = "default_collection_url")]
    pub collection_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub personal_access_token: Option<String>,
    /// 本机名；为空时取 COMPUTERNAME / HOSTNAME
    #[serde(default)]
    pub machine: Option<String>,
    /// 请求超时（秒），0 表示不限
    #[serde(default)]
    pub timeout_secs: u64,
    /// 本机工作区映射
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            collection_url: default_collection_url(),
            api_version: default_api_version(),
            personal_access_token: None,
            machine: None,
            timeout_secs: 0,
            workspaces: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// 按查找顺序加载配置
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&txt).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn collection_url_for(&self, server: &str) -> String {
        self.collection_url.replace("{server}", server).trim_end_matches('/').to_string()
    }

    /// 配置文件优先，其次环境变量
    pub fn access_token(&self) -> Option<String> {
        self.personal_access_token
            .clone()
            .or_else(|| std::env::var(PAT_ENV).ok())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn machine_name(&self) -> String {
        self.machine
            .clone()
            .or_else(|| std::env::var("COMPUTERNAME").ok())
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_default()
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|d| d.join("tfs-search").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.collection_url_for("tfs-01"), "http://tfs-01:8080/tfs/DefaultCollection");
        assert_eq!(cfg.api_version, "5.0");
        assert!(cfg.workspaces.is_empty());
    }

    #[test]
    fn parses_workspaces() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
collection_url = "https://{{server}}/tfs/Main/"
machine = "BUILD-07"

[[workspaces]]
name = "main"
owner = "CORP\\alice"
computer = "BUILD-07"
folders = [{{ server_item = "$/", local_item = "C:\\src" }}]
"#
        )
        .unwrap();

        let cfg = ClientConfig::from_file(f.path()).unwrap();
        assert_eq!(cfg.collection_url_for("tfs.corp"), "https://tfs.corp/tfs/Main");
        assert_eq!(cfg.machine_name(), "BUILD-07");
        assert_eq!(cfg.timeout_secs, 0);
        assert_eq!(cfg.workspaces.len(), 1);
        assert_eq!(cfg.workspaces[0].owner, r"CORP\alice");
        assert_eq!(cfg.workspaces[0].folders[0].local_item, r"C:\src");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "timeout_secs = \"soon\"").unwrap();
        assert!(ClientConfig::from_file(f.path()).is_err());
    }
}

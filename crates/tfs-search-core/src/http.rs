//! 基于 TFS REST API 的阻塞客户端
//!
//! - 认证：`_apis/connectionData`
//! - 项目：`_apis/projects`（分页）
//! - 条目与下载：`_apis/tfvc/items`
//! - 工作区映射属于客户端状态，REST 接口不提供，取自配置文件
use std::io::Read;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::client::{ClientError, VersionControl};
use crate::config::ClientConfig;
use crate::filter::{split_path_glob, NameFilter};
use crate::types::{Item, ItemType, Project, Workspace};

/// 项目分页大小
const PROJECT_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemEntry {
    path: String,
    #[serde(default)]
    is_folder: bool,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    change_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionData {
    authenticated_user: AuthenticatedUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticatedUser {
    #[serde(default)]
    provider_display_name: Option<String>,
    #[serde(default)]
    properties: serde_json::Value,
}

impl AuthenticatedUser {
    /// 优先使用 `DOMAIN\user` 形式的账号名
    fn account(&self) -> String {
        self.properties["Account"]["$value"]
            .as_str()
            .map(|s| s.to_string())
            .or_else(|| self.provider_display_name.clone())
            .unwrap_or_default()
    }
}

impl From<ItemEntry> for Item {
    fn from(e: ItemEntry) -> Self {
        // 缺少签入时间时留空，不编造时间戳
        if e.change_date.is_none() { debug!(path = %e.path, "item has no changeDate"); }
        Item {
            server_path: e.path,
            content_length: e.size,
            item_type: if e.is_folder { ItemType::Folder } else { ItemType::File },
            checkin_date: e.change_date,
        }
    }
}

/// TFS 集合客户端
pub struct TfsHttpClient {
    http: Client,
    collection_url: String,
    api_version: String,
    token: Option<String>,
    workspaces: Vec<Workspace>,
}

impl TfsHttpClient {
    pub fn new(server: &str, config: &ClientConfig) -> Result<Self, ClientError> {
        if server.trim().is_empty() {
            return Err(ClientError::Config("server name is empty".into()));
        }
        let timeout = match config.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tfs-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            collection_url: config.collection_url_for(server),
            api_version: config.api_version.clone(),
            token: config.access_token(),
            workspaces: config.workspaces.clone(),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn get(&self, api: &str) -> RequestBuilder {
        let req = self.http.get(format!("{}/{}", self.collection_url, api));
        match &self.token {
            Some(t) => req.basic_auth("", Some(t)),
            None => req,
        }
    }

    fn send(req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(ClientError::Http { status: status.as_u16(), body })
    }

    fn get_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = Self::send(req)?;
        resp.json::<T>().map_err(|e| {
            if e.is_decode() { ClientError::Decode(e.to_string()) } else { ClientError::Transport(e) }
        })
    }
}

impl VersionControl for TfsHttpClient {
    fn authenticate(&self) -> Result<String, ClientError> {
        let data: ConnectionData = self.get_json(self.get("_apis/connectionData"))?;
        let user = data.authenticated_user.account();
        debug!(%user, "authenticated");
        Ok(user)
    }

    fn list_projects(&self, include_deleted: bool) -> Result<Vec<Project>, ClientError> {
        let state = if include_deleted { "All" } else { "WellFormed" };
        let mut out = Vec::new();
        let mut skip = 0usize;
        loop {
            let req = self.get("_apis/projects").query(&[
                ("stateFilter", state.to_string()),
                ("$top", PROJECT_PAGE_SIZE.to_string()),
                ("$skip", skip.to_string()),
                ("api-version", self.api_version.clone()),
            ]);
            let page: ListResponse<ProjectEntry> = self.get_json(req)?;
            let n = page.value.len();
            out.extend(page.value.into_iter().map(|p| Project::new(p.name)));
            if n < PROJECT_PAGE_SIZE { break; }
            skip += n;
        }
        debug!(projects = out.len(), "listed projects");
        Ok(out)
    }

    fn list_items(&self, path_glob: &str, recursive: bool) -> Result<Vec<Item>, ClientError> {
        let (scope, name_pattern) = split_path_glob(path_glob);
        let filter = NameFilter::new(name_pattern).map_err(|e| ClientError::Config(format!("{e:#}")))?;
        let recursion = if recursive { "Full" } else { "OneLevel" };
        let req = self.get("_apis/tfvc/items").query(&[
            ("scopePath", scope),
            ("recursionLevel", recursion),
            ("api-version", self.api_version.as_str()),
        ]);
        let list: ListResponse<ItemEntry> = self.get_json(req)?;
        let items: Vec<Item> = list
            .value
            .into_iter()
            .filter(|e| e.path != scope)
            .map(Item::from)
            .filter(|i| filter.is_match(i.file_name()))
            .collect();
        debug!(scope, pattern = filter.pattern(), items = items.len(), "listed items");
        Ok(items)
    }

    fn download(&self, item: &Item) -> Result<Box<dyn Read>, ClientError> {
        trace!(path = %item.server_path, "download");
        let req = self
            .get("_apis/tfvc/items")
            .query(&[
                ("path", item.server_path.as_str()),
                ("download", "true"),
                ("api-version", self.api_version.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/octet-stream");
        let resp = Self::send(req)?;
        Ok(Box::new(resp))
    }

    fn query_workspaces(&self, owner: &str, machine: &str) -> Result<Vec<Workspace>, ClientError> {
        Ok(self
            .workspaces
            .iter()
            .filter(|w| w.owner.eq_ignore_ascii_case(owner) && w.computer.eq_ignore_ascii_case(machine))
            .cloned()
            .collect())
    }
}

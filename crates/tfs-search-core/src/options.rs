//! 搜索选项与统计信息（模块）
use std::path::PathBuf;

/// 默认文件类型过滤（匹配全部文件）
pub const DEFAULT_FILTER: &str = "*.*";
/// 默认 TFS 服务器名
pub const DEFAULT_SERVER: &str = "tfs-01";

/// 搜索选项（由命令行开关解析得到）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// 文件类型过滤（通配符，例如 `*.cs`）
    pub filter: String,
    /// TFS 服务器名（拼入集合 URL）
    pub server: String,
    /// 仅扫描指定项目（/P）
    pub project: Option<String>,
    /// CSV 输出文件（/O）
    pub output_file: Option<PathBuf>,
    /// 项目白名单文件（/R），每行一个项目名
    pub project_list_file: Option<PathBuf>,
    /// 搜索词文件（/S），每行一个搜索词
    pub search_terms_file: Option<PathBuf>,
    /// 命令行直接给出的单个搜索词
    pub inline_search_term: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            server: DEFAULT_SERVER.to_string(),
            project: None,
            output_file: None,
            project_list_file: None,
            search_terms_file: None,
            inline_search_term: None,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub projects_scanned: usize,
    pub files_scanned: usize,
    pub lines_read: usize,
    pub matches: usize,
}

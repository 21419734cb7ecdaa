//! 扫描主流程：项目 → 条目 → 下载 → 逐行匹配
//!
//! 顺序保证：项目顺序 → 条目枚举顺序 → 行号 → 搜索词顺序。
//! 任何服务端或 I/O 错误都会中止整个扫描（不做跳过或重试）。
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use tracing::{debug, warn};

use crate::client::VersionControl;
use crate::engine::scan_stream;
use crate::matcher::TermMatcher;
use crate::options::ScanStats;
use crate::types::{Item, ItemType, MatchRecord, Project};

/// 扫描参数
pub struct ScanSettings<'a> {
    /// 文件类型过滤（拼接到项目根路径之后）
    pub filter: &'a str,
    pub matcher: &'a TermMatcher,
    /// 查询工作区使用的用户与机器
    pub owner: &'a str,
    pub machine: &'a str,
    /// 是否在终端绘制 `当前/总数` 进度
    pub show_progress: bool,
}

/// 依次扫描所选项目，返回全部命中记录
pub fn scan_projects(
    client: &dyn VersionControl,
    projects: &[Project],
    settings: &ScanSettings<'_>,
    console: &mut dyn Write,
    stats: &mut ScanStats,
) -> Result<Vec<MatchRecord>> {
    let mut matches: Vec<MatchRecord> = Vec::new();

    for project in projects {
        writeln!(console, "Project {}:", project.name)?;
        let path_glob = format!("{}/{}", project.server_root, settings.filter);
        let items = client
            .list_items(&path_glob, true)
            .with_context(|| format!("list items under {path_glob}"))?;
        let files: Vec<Item> = items
            .into_iter()
            .filter(|i| i.item_type == ItemType::File && i.content_length > 0)
            .collect();
        debug!(project = %project.name, files = files.len(), "files to check");
        writeln!(console, "checking {} files...:", files.len())?;

        let pb = progress_bar(files.len() as u64, settings.show_progress)?;
        for file in &files {
            pb.inc(1);
            let local_path = resolve_local_path(client, file, settings.owner, settings.machine);
            scan_file(client, project, file, &local_path, settings.matcher, &mut matches, stats)?;
        }
        pb.finish();

        stats.projects_scanned += 1;
        writeln!(console)?;
        writeln!(console, "...found {}...", matches.len())?;
    }

    stats.matches = matches.len();
    Ok(matches)
}

fn scan_file(
    client: &dyn VersionControl,
    project: &Project,
    file: &Item,
    local_path: &str,
    matcher: &TermMatcher,
    matches: &mut Vec<MatchRecord>,
    stats: &mut ScanStats,
) -> Result<()> {
    let stream = client
        .download(file)
        .with_context(|| format!("download {}", file.server_path))?;
    let res = scan_stream(stream, matcher)
        .with_context(|| format!("read {}", file.server_path))?;

    stats.files_scanned += 1;
    stats.lines_read += res.lines_read;
    for hit in res.hits {
        matches.push(MatchRecord {
            project: project.name.clone(),
            file_name: file.file_name().to_string(),
            server_path: file.server_path.clone(),
            local_path: local_path.to_string(),
            last_modified: file.checkin_date,
            line_number: hit.line_number,
            matched_text: hit.text,
        });
    }
    Ok(())
}

/// 推导本地工作区路径（尽力而为，失败时返回空串）
fn resolve_local_path(client: &dyn VersionControl, file: &Item, owner: &str, machine: &str) -> String {
    let workspaces = match client.query_workspaces(owner, machine) {
        Ok(ws) => ws,
        Err(e) => {
            warn!(error = %e, "workspace query failed");
            return String::new();
        }
    };
    match workspaces.first().and_then(|w| w.folders.first()) {
        Some(folder) => map_to_local(&file.server_path, &folder.local_item),
        None => String::new(),
    }
}

/// 用本地根目录替换服务器根 `$`，并转换路径分隔符
pub(crate) fn map_to_local(server_path: &str, local_root: &str) -> String {
    if local_root.trim().is_empty() { return String::new(); }
    let rest = server_path.strip_prefix('$').unwrap_or(server_path);
    let root = local_root.trim_end_matches(['/', '\\']);
    format!("{root}{rest}").replace('/', std::path::MAIN_SEPARATOR_STR)
}

fn progress_bar(total: u64, visible: bool) -> Result<ProgressBar> {
    if !visible { return Ok(ProgressBar::hidden()); }
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    pb.set_style(ProgressStyle::with_template("{pos}/{len}")?);
    Ok(pb)
}

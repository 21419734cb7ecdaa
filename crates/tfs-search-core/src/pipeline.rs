//! 一次完整的搜索：搜索词 → 认证 → 选项目 → 扫描 → 输出
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use crate::client::VersionControl;
use crate::lists::read_list_file;
use crate::matcher::TermMatcher;
use crate::options::{ScanStats, SearchOptions};
use crate::report::{print_matches, write_csv_file};
use crate::scan::{scan_projects, ScanSettings};
use crate::selector::{select_projects, ProjectScope};

const SEPARATOR: &str = "****************************************";

/// 运行环境（与搜索选项无关的部分）
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// 本机名，用于查询工作区
    pub machine: String,
    pub show_progress: bool,
}

/// 解析搜索词：/S 文件中的非空行，或命令行给出的单个搜索词
pub fn load_search_terms(opts: &SearchOptions) -> Result<Vec<String>> {
    if let Some(path) = &opts.search_terms_file {
        return read_list_file(path).context("load search terms");
    }
    Ok(opts.inline_search_term.iter().cloned().collect())
}

/// 执行搜索并输出结果；任何错误都会中止本次运行
pub fn search_and_report(
    opts: &SearchOptions,
    client: &dyn VersionControl,
    ctx: &RunContext,
    console: &mut dyn Write,
) -> Result<ScanStats> {
    let terms = load_search_terms(opts)?;
    let matcher = TermMatcher::new(&terms)?;
    let scope = ProjectScope::from_options(opts).context("load project filter")?;

    writeln!(console, "Searching for '{}' within {} (file type:{})", terms.join(", "), opts.server, opts.filter)?;
    writeln!(console, "\n{SEPARATOR}\n")?;
    info!(server = %opts.server, filter = %opts.filter, terms = terms.len(), "starting search");

    let owner = client.authenticate().context("authenticate")?;
    let all = client.list_projects(true).context("list projects")?;
    let projects = select_projects(all, &scope);
    writeln!(console, "Found {} Projects...\n", projects.len())?;

    let mut stats = ScanStats::default();
    let settings = ScanSettings {
        filter: &opts.filter,
        matcher: &matcher,
        owner: &owner,
        machine: &ctx.machine,
        show_progress: ctx.show_progress,
    };
    let matches = scan_projects(client, &projects, &settings, console, &mut stats)?;

    writeln!(console, "\n{SEPARATOR}\n")?;
    print_matches(&matches, console)?;

    if let Some(path) = opts.output_file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        write_csv_file(&matches, path)?;
        info!(path = %path.display(), rows = matches.len(), "csv written");
    }

    info!(
        projects = stats.projects_scanned,
        files = stats.files_scanned,
        matches = stats.matches,
        "search finished"
    );
    Ok(stats)
}

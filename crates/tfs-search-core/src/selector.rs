//! 项目选择：全部 / 指定单个 / 按白名单过滤
use anyhow::Result;

use crate::lists::read_list_file;
use crate::options::SearchOptions;
use crate::types::Project;

/// 项目选择方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectScope {
    All,
    Named(String),
    Listed(Vec<String>),
}

impl ProjectScope {
    /// 由选项确定选择方式（/P 优先于 /R，空串视为未设置）
    pub fn from_options(opts: &SearchOptions) -> Result<Self> {
        if let Some(name) = opts.project.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(Self::Named(name.to_string()));
        }
        if let Some(path) = opts.project_list_file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::Listed(read_list_file(path)?));
        }
        Ok(Self::All)
    }
}

/// 按服务器枚举顺序返回需要扫描的项目
pub fn select_projects(all: Vec<Project>, scope: &ProjectScope) -> Vec<Project> {
    match scope {
        ProjectScope::All => all,
        ProjectScope::Named(name) => all.into_iter().filter(|p| &p.name == name).collect(),
        ProjectScope::Listed(names) => all.into_iter().filter(|p| names.contains(&p.name)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn server_projects() -> Vec<Project> {
        ["A", "B", "C", "D"].into_iter().map(Project::new).collect()
    }

    fn names(v: &[Project]) -> Vec<&str> {
        v.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn list_keeps_server_order() {
        let scope = ProjectScope::Listed(vec!["C".into(), "A".into()]);
        assert_eq!(names(&select_projects(server_projects(), &scope)), vec!["A", "C"]);
    }

    #[test]
    fn named_project() {
        let picked = select_projects(server_projects(), &ProjectScope::Named("B".into()));
        assert_eq!(names(&picked), vec!["B"]);
        assert_eq!(picked[0].server_root, "$/B");
        assert!(select_projects(server_projects(), &ProjectScope::Named("Z".into())).is_empty());
    }

    #[test]
    fn default_is_everything() {
        assert_eq!(names(&select_projects(server_projects(), &ProjectScope::All)), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn scope_from_options() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "C\n\nA").unwrap();

        let mut opts = SearchOptions { project_list_file: Some(f.path().to_path_buf()), ..Default::default() };
        assert_eq!(ProjectScope::from_options(&opts).unwrap(), ProjectScope::Listed(vec!["C".into(), "A".into()]));

        opts.project = Some("B".into());
        assert_eq!(ProjectScope::from_options(&opts).unwrap(), ProjectScope::Named("B".into()));

        assert_eq!(ProjectScope::from_options(&SearchOptions::default()).unwrap(), ProjectScope::All);
    }

    #[test]
    fn notepad_list_file_keeps_first_project() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"\xEF\xBB\xBFA\r\nC\r\n").unwrap();

        let opts = SearchOptions { project_list_file: Some(f.path().to_path_buf()), ..Default::default() };
        let scope = ProjectScope::from_options(&opts).unwrap();
        assert_eq!(names(&select_projects(server_projects(), &scope)), vec!["A", "C"]);
    }
}

//! 文件类型通配符（Windows 风格，大小写不敏感）
//!
//! `*` 匹配任意字符序列，`?` 匹配单个字符，`[...]` 为字符集；
//! `*.*` 与 `*` 一样匹配全部文件名（包括不含 `.` 的名字）。
use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    re: Option<Regex>,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern == "*" || pattern == "*.*" {
            return Ok(Self { pattern: pattern.to_string(), re: None });
        }
        let re = Regex::new(&wildcard_to_regex(pattern))
            .with_context(|| format!("invalid file filter {pattern:?}"))?;
        Ok(Self { pattern: pattern.to_string(), re: Some(re) })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.re {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::from("(?i)^");
    let mut in_class = false;
    for ch in pattern.chars() {
        if in_class {
            if ch == ']' { in_class = false; }
            if ch == '\\' { out.push('\\'); }
            out.push(ch);
            continue;
        }
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => { in_class = true; out.push('['); }
            _ => out.push_str(&regex::escape(&ch.to_string())),
        }
    }
    // 未闭合的字符集按字面量处理
    if in_class {
        return format!("(?i)^{}$", regex::escape(pattern));
    }
    out.push('$');
    out
}

/// 将 `$/Proj/dir/*.cs` 拆分为作用域目录与名字通配符
pub fn split_path_glob(path_glob: &str) -> (&str, &str) {
    match path_glob.rfind('/') {
        Some(idx) => (&path_glob[..idx], &path_glob[idx + 1..]),
        None => (path_glob, ""),
    }
}

//! 命令行开关解析（`/X:value` 风格）
//!
//! 规则：
//! - 合法开关为大小写敏感的两字符标签 `/F` `/T` `/P` `/O` `/R` `/S`，后接 `:` 与取值；
//! - 长度不超过 2，或前两字符不是合法标签的参数一律视为“位置参数”（例如 `/Q:abc`）；
//! - 位置参数与 `/S` 二者必须恰好出现其一，且位置参数最多一个。
use std::path::PathBuf;

use crate::options::SearchOptions;

/// 合法开关标签
pub const VALID_SWITCHES: [&str; 6] = ["/F", "/T", "/P", "/O", "/R", "/S"];

/// 用法错误（CLI 打印用法后正常退出）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("no arguments given")]
    Empty,
    #[error("expected exactly one search term, found {0}")]
    SearchTermCount(usize),
    #[error("a search term cannot be combined with /S")]
    TermWithSearchFile,
}

fn is_switch(arg: &str) -> bool {
    arg.len() > 2 && arg.get(..2).map_or(false, |tag| VALID_SWITCHES.contains(&tag))
}

/// 去掉 `"/X:"` 前缀；缺少冒号时整段保留（与逐字替换的行为一致）
fn switch_value(arg: &str, tag: &str) -> String {
    let prefix = format!("{tag}:");
    arg.replacen(&prefix, "", 1)
}

/// 将参数列表（不含程序名）解析为搜索选项
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<SearchOptions, ArgsError> {
    if args.is_empty() { return Err(ArgsError::Empty); }

    let positional: Vec<&str> = args.iter().map(|a| a.as_ref()).filter(|a| !is_switch(a)).collect();
    let has_search_file = args.iter().any(|a| {
        let a = a.as_ref();
        a.len() > 2 && a.starts_with("/S")
    });

    if has_search_file {
        if !positional.is_empty() { return Err(ArgsError::TermWithSearchFile); }
    } else if positional.len() != 1 {
        return Err(ArgsError::SearchTermCount(positional.len()));
    }

    let mut opts = SearchOptions::default();
    for arg in args.iter().map(|a| a.as_ref()).filter(|a| is_switch(a)) {
        // 同一开关出现多次时以最后一次为准
        match &arg[..2] {
            "/F" => opts.filter = switch_value(arg, "/F"),
            "/T" => opts.server = switch_value(arg, "/T"),
            "/P" => opts.project = Some(switch_value(arg, "/P")),
            "/O" => opts.output_file = Some(PathBuf::from(switch_value(arg, "/O"))),
            "/R" => opts.project_list_file = Some(PathBuf::from(switch_value(arg, "/R"))),
            "/S" => opts.search_terms_file = Some(PathBuf::from(switch_value(arg, "/S"))),
            _ => {}
        }
    }
    if !has_search_file {
        opts.inline_search_term = positional.first().map(|s| s.to_string());
    }

    Ok(opts)
}

/// 用法说明
pub fn usage() -> String {
    let lines = [
        "Usage",
        "tfs-search <search term (optional with /S)> <switches (optional)>",
        "",
        "\tSwitches: [all switches end with (:) colon]",
        "\t/S\tInput search file (filePath, newlines)",
        "\t\t\t - this will take the place of the <search term> parameter",
        "\t/F\tFile type Filter (*.cs)",
        "\t/T\tTFS Server",
        "\t/P\tTFS Project",
        "\t/R\tFilter by TFS Projects (filePath, newlines)",
        "\t/O\tOutput file (filePath for CSV)",
        "",
        "example: tfs-search searchTerm /F:*.config",
        r#"example: tfs-search searchTerm /F:*.cs /P:MyTFSProject /O:"C:\temp\test.csv""#,
        r#"example: tfs-search /S:"C:\mySearchTerms.txt" /F:*.cs /R:"C:\MyProjectScope.txt" /O:"C:\temp\test.csv""#,
        "",
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_term_uses_defaults() {
        let opts = parse_args(&["needle"]).unwrap();
        assert_eq!(opts.inline_search_term.as_deref(), Some("needle"));
        assert_eq!(opts.filter, "*.*");
        assert_eq!(opts.server, "tfs-01");
        assert!(opts.project.is_none());
        assert!(opts.search_terms_file.is_none());
    }

    #[test]
    fn all_switches_are_extracted() {
        let opts = parse_args(&[
            "needle", "/F:*.cs", "/T:tfs-02", "/P:Alpha", "/O:out.csv", "/R:projects.txt",
        ])
        .unwrap();
        assert_eq!(opts.filter, "*.cs");
        assert_eq!(opts.server, "tfs-02");
        assert_eq!(opts.project.as_deref(), Some("Alpha"));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.csv")));
        assert_eq!(opts.project_list_file, Some(PathBuf::from("projects.txt")));
    }

    #[test]
    fn search_file_replaces_term() {
        let opts = parse_args(&["/S:terms.txt", "/F:*.config"]).unwrap();
        assert_eq!(opts.search_terms_file, Some(PathBuf::from("terms.txt")));
        assert!(opts.inline_search_term.is_none());
    }

    #[test]
    fn term_and_search_file_is_usage_error() {
        assert_eq!(parse_args(&["needle", "/S:terms.txt"]), Err(ArgsError::TermWithSearchFile));
    }

    #[test]
    fn neither_term_nor_search_file_is_usage_error() {
        assert_eq!(parse_args(&["/F:*.cs"]), Err(ArgsError::SearchTermCount(0)));
        let empty: [&str; 0] = [];
        assert_eq!(parse_args(&empty), Err(ArgsError::Empty));
    }

    #[test]
    fn two_terms_is_usage_error() {
        assert_eq!(parse_args(&["one", "two"]), Err(ArgsError::SearchTermCount(2)));
    }

    #[test]
    fn unknown_switch_counts_as_positional() {
        // `/Q:abc` 不是合法开关，因此与 needle 一起构成两个位置参数
        assert_eq!(parse_args(&["needle", "/Q:abc"]), Err(ArgsError::SearchTermCount(2)));
        let opts = parse_args(&["/Q:abc"]).unwrap();
        assert_eq!(opts.inline_search_term.as_deref(), Some("/Q:abc"));
        assert_eq!(parse_args(&["/S:terms.txt", "/Q:abc"]), Err(ArgsError::TermWithSearchFile));
    }

    #[test]
    fn switch_tags_are_case_sensitive() {
        let opts = parse_args(&["/f:*.cs"]).unwrap();
        assert_eq!(opts.inline_search_term.as_deref(), Some("/f:*.cs"));
        assert_eq!(opts.filter, "*.*");
    }

    #[test]
    fn short_tokens_are_positional() {
        let opts = parse_args(&["/F"]).unwrap();
        assert_eq!(opts.inline_search_term.as_deref(), Some("/F"));
    }

    #[test]
    fn last_switch_wins_and_colonless_value_is_kept() {
        let opts = parse_args(&["x", "/T:first", "/T:second", "/Fcs"]).unwrap();
        assert_eq!(opts.server, "second");
        assert_eq!(opts.filter, "/Fcs");
    }

    #[test]
    fn value_may_contain_colons() {
        let opts = parse_args(&["x", r"/O:C:\temp\out.csv"]).unwrap();
        assert_eq!(opts.output_file, Some(PathBuf::from(r"C:\temp\out.csv")));
    }

    #[test]
    fn usage_lists_every_switch() {
        let text = usage();
        for tag in VALID_SWITCHES {
            assert!(text.contains(&format!("\t{tag}\t")), "missing {tag}");
        }
    }
}

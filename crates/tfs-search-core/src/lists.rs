//! 列表文件加载（搜索词 / 项目白名单）
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::engine::decoding_reader;

/// 读取文本文件中的非空行（去空白后为空的行被丢弃，保留行原文）
/// - 与下载内容一样按 BOM 识别编码，记事本保存的文件首行不会带上 BOM
pub fn read_list_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("read list file {}", path.display()))?;
    let mut bytes = Vec::new();
    decoding_reader(file)
        .read_to_end(&mut bytes)
        .with_context(|| format!("read list file {}", path.display()))?;
    Ok(non_blank_lines(&String::from_utf8_lossy(&bytes)))
}

pub(crate) fn non_blank_lines(txt: &str) -> Vec<String> {
    txt.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect()
}

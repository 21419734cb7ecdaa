//! 结果输出：控制台列表 + CSV 文件
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::MatchRecord;

/// 按发现顺序逐行打印命中文件的服务器路径
pub fn print_matches(matches: &[MatchRecord], out: &mut dyn Write) -> Result<()> {
    for m in matches {
        writeln!(out, "{}", m.server_path)?;
    }
    Ok(())
}

/// 以 CSV 写出全部命中记录（带表头，列顺序同 `MatchRecord` 字段顺序）
pub fn write_csv<W: Write>(matches: &[MatchRecord], out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    if matches.is_empty() {
        // 无记录时 serde 无法推导表头，手动写出
        wtr.write_record(CSV_HEADERS)?;
    }
    for m in matches {
        wtr.serialize(m)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 创建（或截断）输出文件并写入 CSV
pub fn write_csv_file(matches: &[MatchRecord], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_csv(matches, &mut out).with_context(|| format!("write {}", path.display()))?;
    out.flush()?;
    Ok(())
}

pub const CSV_HEADERS: [&str; 7] =
    ["Project", "FileName", "ServerPath", "LocalPath", "LastModified", "LineNumber", "MatchedText"];

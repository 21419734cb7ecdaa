//! 逐行扫描引擎
use anyhow::Result;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::io::{BufRead, BufReader, Read};

use crate::matcher::TermMatcher;

/// 按 BOM 识别编码（UTF-8 / UTF-16LE / UTF-16BE）并转码为 UTF-8，同时去掉 BOM；
/// 无 BOM 时字节原样透传
pub(crate) fn decoding_reader<R: Read>(reader: R) -> DecodeReaderBytes<R, Vec<u8>> {
    DecodeReaderBytesBuilder::new().bom_sniffing(true).strip_bom(true).build(reader)
}

/// 单次行命中（每个命中的搜索词一条）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineHit {
    pub(crate) line_number: usize,
    pub(crate) term_index: usize,
    pub(crate) text: String,
}

/// 单个文件的扫描结果
#[derive(Debug, Default)]
pub(crate) struct StreamScan {
    pub(crate) hits: Vec<LineHit>,
    pub(crate) lines_read: usize,
}

/// 按行扫描文本流
/// - 先按 BOM 转码，再以 `\n` 分行并去掉结尾的 `\r`；非法 UTF-8 有损替换
/// - 空白行不做匹配，但行号照常递增
pub(crate) fn scan_stream<R: Read>(stream: R, matcher: &TermMatcher) -> Result<StreamScan> {
    let mut reader = BufReader::new(decoding_reader(stream));
    let mut out = StreamScan::default();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 { break; }
        out.lines_read += 1;
        let line_number = out.lines_read;

        let mut raw = buf.as_slice();
        raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        let text = String::from_utf8_lossy(raw);
        if text.trim().is_empty() { continue; }

        for term_index in matcher.matching_terms(&text) {
            out.hits.push(LineHit { line_number, term_index, text: text.to_string() });
        }
    }

    Ok(out)
}

//! 搜索词匹配器（大小写不敏感的子串匹配，非正则）
//!
//! - 搜索词与行文本统一做 Unicode 小写折叠后再比较；
//! - 去重后的小写搜索词构建一个 Aho-Corasick 自动机，每行只扫描一遍；
//! - 结果按原搜索词顺序返回，重复的搜索词各自产生一次命中。
use std::collections::HashMap;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use anyhow::Result;

pub struct TermMatcher {
    terms: Vec<String>,
    ac: Option<AhoCorasick>,
    /// 搜索词下标 -> 自动机模式下标（空搜索词为 None，恒命中）
    term_to_pattern: Vec<Option<usize>>,
    pattern_count: usize,
}

impl TermMatcher {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_index: HashMap<String, usize> = HashMap::new();
        let mut term_to_pattern = Vec::with_capacity(terms.len());

        for t in terms {
            let folded = t.as_ref().to_lowercase();
            if folded.is_empty() {
                term_to_pattern.push(None);
                continue;
            }
            let id = match pattern_index.get(&folded) {
                Some(id) => *id,
                None => {
                    let id = patterns.len();
                    patterns.push(folded.clone());
                    pattern_index.insert(folded, id);
                    id
                }
            };
            term_to_pattern.push(Some(id));
        }

        let ac = if patterns.is_empty() {
            None
        } else {
            Some(AhoCorasickBuilder::new().match_kind(MatchKind::Standard).build(&patterns)?)
        };

        Ok(Self {
            terms: terms.iter().map(|t| t.as_ref().to_string()).collect(),
            ac,
            term_to_pattern,
            pattern_count: patterns.len(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 返回在该行中出现的搜索词下标（按搜索词顺序）
    pub fn matching_terms(&self, line: &str) -> Vec<usize> {
        if self.terms.is_empty() { return Vec::new(); }

        let mut hit = vec![false; self.pattern_count];
        if let Some(ac) = &self.ac {
            let folded = line.to_lowercase();
            // 重叠查找：保证被其他模式覆盖的短模式也能命中
            for m in ac.find_overlapping_iter(&folded) {
                hit[m.pattern().as_usize()] = true;
            }
        }

        self.term_to_pattern
            .iter()
            .enumerate()
            .filter(|(_, p)| p.map_or(true, |id| hit[id]))
            .map(|(i, _)| i)
            .collect()
    }
}

//! 文档切分
//!
//! 递归字符切分：依次尝试 `"\n\n"`、`"\n"`、`" "`、`""` 作为分隔符，
//! 再把片段贪心合并到 `chunk_size`，相邻块之间保留不超过 `chunk_overlap` 的重叠。
//! 长度按字符数计算。

use std::collections::VecDeque;

use crate::errors::{FaqError, Result};

const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// 文档片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 在文档中的顺序
    pub index: usize,
    pub text: String,
}

/// 切分器
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(FaqError::Config("chunk size must be positive".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(FaqError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// 切分整篇文档
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        self.split_recursive(text, &SEPARATORS)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk { index, text })
            .collect()
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // 选第一个在文本中出现的分隔符，"" 兜底
        let (pos, separator) = separators
            .iter()
            .enumerate()
            .find(|(_, sep)| sep.is_empty() || text.contains(**sep))
            .map(|(i, sep)| (i, *sep))
            .unwrap_or((separators.len().saturating_sub(1), ""));
        let remaining = &separators[(pos + 1).min(separators.len())..];

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        // 只有严格短于 chunk_size 的片段直接参与合并，等长片段也继续细分
        for piece in pieces {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge(&pending, separator));
                pending.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending, separator));
        }

        chunks
    }

    /// 贪心合并片段，块之间保留尾部重叠
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);
            let joined_len = if window.is_empty() { 0 } else { sep_len };

            if total + len + joined_len > self.chunk_size && !window.is_empty() {
                push_joined(&mut chunks, &window, separator);

                // 丢弃头部，直到剩余部分不超过重叠长度且能容纳新片段
                while !window.is_empty()
                    && (total > self.chunk_overlap
                        || (total + len + sep_len > self.chunk_size && total > 0))
                {
                    if let Some(front) = window.pop_front() {
                        total -= char_len(front);
                        if !window.is_empty() {
                            total -= sep_len;
                        }
                    }
                }
            }

            if !window.is_empty() {
                total += sep_len;
            }
            window.push_back(piece);
            total += len;
        }

        push_joined(&mut chunks, &window, separator);
        chunks
    }
}

fn push_joined(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

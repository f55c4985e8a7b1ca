//! Chunk post-processing
//!
//! Merges undersized chunks, re-splits anything still above the overflow
//! ceiling and drops chunks too short to be useful. The ceiling
//! (`max_length * overflow_factor`) is authoritative: a merge that would
//! cross it flushes the accumulator first instead.

use munch_core::{char_len, Script};

use crate::config::{BoundaryPolicy, ChunkingConfig};

/// Single forward merge pass plus oversize and undersize clean-up
#[derive(Debug, Clone, Copy)]
pub struct ChunkPostProcessor<'a> {
    config: &'a ChunkingConfig,
    policy: &'a BoundaryPolicy,
}

impl<'a> ChunkPostProcessor<'a> {
    pub fn new(config: &'a ChunkingConfig, policy: &'a BoundaryPolicy) -> Self {
        Self { config, policy }
    }

    pub fn process(&self, chunks: Vec<String>) -> Vec<String> {
        let ceiling = self.policy.overflow_ceiling(self.config);

        self.merge(chunks, ceiling)
            .into_iter()
            .flat_map(|chunk| {
                if char_len(&chunk) > ceiling {
                    tracing::debug!(length = char_len(&chunk), ceiling, "re-splitting oversized chunk");
                    split_oversized(&chunk, self.config.max_length())
                } else {
                    vec![chunk]
                }
            })
            .filter(|chunk| {
                let length = char_len(chunk);
                let keep = length >= self.policy.min_output_chars;
                if !keep && length > 0 {
                    tracing::debug!(length, "dropping chunk below minimum output length");
                }
                keep
            })
            .collect()
    }

    fn merge(&self, chunks: Vec<String>, ceiling: usize) -> Vec<String> {
        let mut merged = Vec::with_capacity(chunks.len());
        let mut acc = String::new();
        let mut acc_len = 0usize;

        let flush = |acc: &mut String, acc_len: &mut usize, merged: &mut Vec<String>| {
            if *acc_len > 0 {
                merged.push(std::mem::take(acc));
                *acc_len = 0;
            }
        };

        for chunk in chunks {
            let chunk = chunk.trim().to_string();
            let chunk_len = char_len(&chunk);
            if chunk_len == 0 {
                continue;
            }

            let separator = Script::of_tail(&acc).chunk_separator();
            let merged_len = acc_len + char_len(separator) + chunk_len;

            if acc_len > 0 && merged_len > ceiling {
                flush(&mut acc, &mut acc_len, &mut merged);
                acc = chunk;
                acc_len = chunk_len;
            } else if chunk_len < self.config.min_length() && acc_len > 0 {
                acc.push_str(separator);
                acc.push_str(&chunk);
                acc_len = merged_len;
            } else if acc_len > self.policy.accumulator_flush_after {
                flush(&mut acc, &mut acc_len, &mut merged);
                acc = chunk;
                acc_len = chunk_len;
            } else if acc_len == 0 {
                acc = chunk;
                acc_len = chunk_len;
            } else {
                acc.push_str(separator);
                acc.push_str(&chunk);
                acc_len = merged_len;
            }

            if acc_len > ceiling {
                flush(&mut acc, &mut acc_len, &mut merged);
            }
        }

        flush(&mut acc, &mut acc_len, &mut merged);
        merged
    }
}

/// Split `text` into pieces of at most `max_chars` characters
///
/// Breaks at whitespace where possible; runs without whitespace (CJK text,
/// very long tokens) are cut at character boundaries.
pub fn split_oversized(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = char_len(word);

        if word_len > max_chars {
            if current_len > 0 {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for window in chars.chunks(max_chars) {
                pieces.push(window.iter().collect());
            }
            continue;
        }

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 {
        pieces.push(current);
    }
    pieces
}

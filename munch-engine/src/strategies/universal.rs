//! Language-agnostic fallback strategy

use munch_core::{char_len, Script, SentenceSplitter};

use super::{ChunkContext, ChunkingStrategy, StrategyKind};

/// Greedy accumulation over the union of all registered terminators
///
/// Flushes before a sentence that would overshoot `target_length`, and
/// immediately once the running chunk exceeds `max_length`. Chunks shorter
/// than `min_universal_chars` are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalStrategy;

impl ChunkingStrategy for UniversalStrategy {
    fn chunk(&self, text: &str, ctx: &ChunkContext<'_>) -> Vec<String> {
        let splitter = SentenceSplitter::universal(ctx.registry, ctx.thresholds);
        let mut acc = Accumulator::new(ctx.policy.min_universal_chars);

        for sentence in splitter.split(text) {
            let sentence_len = char_len(&sentence);
            if !acc.is_empty()
                && acc.len + acc.separator_len() + sentence_len > ctx.config.target_length()
            {
                acc.flush();
            }
            acc.push(&sentence, sentence_len);

            if acc.len > ctx.config.max_length() {
                acc.flush();
            }
        }

        acc.finish()
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Universal
    }
}

struct Accumulator {
    chunks: Vec<String>,
    current: String,
    len: usize,
    min_chars: usize,
}

impl Accumulator {
    fn new(min_chars: usize) -> Self {
        Self {
            chunks: Vec::new(),
            current: String::new(),
            len: 0,
            min_chars,
        }
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn separator(&self) -> &'static str {
        Script::of_tail(&self.current).sentence_separator()
    }

    fn separator_len(&self) -> usize {
        char_len(self.separator())
    }

    fn push(&mut self, sentence: &str, sentence_len: usize) {
        if !self.is_empty() {
            let separator = self.separator();
            self.current.push_str(separator);
            self.len += char_len(separator);
        }
        self.current.push_str(sentence);
        self.len += sentence_len;
    }

    fn flush(&mut self) {
        if self.is_empty() {
            return;
        }
        let chunk = std::mem::take(&mut self.current);
        let script = Script::of_tail(&chunk);
        let mut chunk = chunk.trim().to_string();
        if !chunk.ends_with(munch_core::language::is_terminal_punctuation) {
            chunk.push(script.terminator());
        }

        let length = char_len(&chunk);
        if length < self.min_chars {
            tracing::debug!(length, "dropping short universal chunk");
        } else {
            self.chunks.push(chunk);
        }
        self.len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}

//! Single-language strategy

use munch_core::SentenceSplitter;

use super::{ChunkContext, ChunkingStrategy, StrategyKind};
use crate::boundary::ChunkBoundaryDecider;

/// Splits sentences with the primary profile and folds them with the
/// boundary decider
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLanguageStrategy;

impl ChunkingStrategy for SingleLanguageStrategy {
    fn chunk(&self, text: &str, ctx: &ChunkContext<'_>) -> Vec<String> {
        let splitter = SentenceSplitter::for_profile(ctx.primary, ctx.thresholds);
        let decider = ChunkBoundaryDecider::new(ctx.primary, ctx.config, ctx.policy, ctx.thresholds);
        decider.chunk(splitter.split(text))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::SingleLanguage
    }
}

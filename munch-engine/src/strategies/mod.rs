//! Chunking strategies and the fallback chain
//!
//! Every strategy turns normalized text into raw (not yet post-processed)
//! chunks. The [`StrategyChain`] tries strategies in order and keeps the
//! first output its acceptance predicate allows.

use munch_core::{DetectionThresholds, LanguageProfile, LanguageRegistry};
use serde::Serialize;

use crate::config::{BoundaryPolicy, ChunkingConfig};

mod chain;
mod mixed;
mod single;
mod universal;

pub use chain::{Acceptance, ChainOutcome, ChainStep, StrategyChain};
pub use mixed::MixedLanguageStrategy;
pub use single::SingleLanguageStrategy;
pub use universal::UniversalStrategy;

/// Everything a strategy may read during one call
#[derive(Debug, Clone, Copy)]
pub struct ChunkContext<'a> {
    pub registry: &'a LanguageRegistry,
    /// Profile chosen for the whole document
    pub primary: &'a LanguageProfile,
    pub config: &'a ChunkingConfig,
    pub policy: &'a BoundaryPolicy,
    pub thresholds: &'a DetectionThresholds,
}

/// Identifies a strategy in output metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Sentence splitting with the primary profile
    SingleLanguage,
    /// Paragraph-level chunking with per-paragraph profiles
    MixedLanguage,
    /// Language-agnostic splitting on every known terminator
    Universal,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::SingleLanguage => "single_language",
            StrategyKind::MixedLanguage => "mixed_language",
            StrategyKind::Universal => "universal",
        }
    }
}

/// A way of turning normalized text into raw chunks
pub trait ChunkingStrategy: Send + Sync {
    /// Produce raw chunks in document order
    fn chunk(&self, text: &str, ctx: &ChunkContext<'_>) -> Vec<String>;

    /// Strategy identity for metadata and logging
    fn kind(&self) -> StrategyKind;
}

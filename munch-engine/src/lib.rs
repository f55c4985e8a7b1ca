//! Multilingual semantic chunking
//!
//! This crate turns free text into ordered, length-bounded chunks suitable
//! for embedding. It builds on the language profiles of `munch-core` and adds
//! chunk-size policy on top.
//!
//! # Pipeline
//!
//! 1. normalize whitespace
//! 2. detect the language distribution and pick a strategy chain
//! 3. run strategies until one output is accepted
//! 4. merge, re-split and filter the raw chunks
//!
//! # Example
//!
//! ```rust
//! use munch_engine::{ChunkingEngine, StrategyKind};
//!
//! let mut engine = ChunkingEngine::new();
//! engine.configure(300, 500, 60).unwrap();
//!
//! let output = engine.chunk_with_metadata(
//!     "The price rose by 3.5 percent this quarter. Analysts expect further gains.",
//! );
//! assert_eq!(output.chunks.len(), 1);
//! assert_eq!(output.metadata.strategy, Some(StrategyKind::SingleLanguage));
//! ```

pub mod boundary;
pub mod config;
pub mod engine;
pub mod error;
pub mod postprocess;
pub mod ranking;
pub mod strategies;

pub use boundary::{BreakReason, ChunkBoundaryDecider, SentenceSignals};
pub use config::{defaults, BoundaryPolicy, ChunkingConfig, ChunkingConfigBuilder};
pub use engine::{ChunkOutput, ChunkingEngine, ChunkingEngineBuilder, ChunkingMetadata};
pub use error::{EngineError, Result};
pub use postprocess::{split_oversized, ChunkPostProcessor};
pub use ranking::{cosine_similarity, rank_chunks, RankedChunk, RankingOptions};
pub use strategies::{
    Acceptance, ChainOutcome, ChainStep, ChunkContext, ChunkingStrategy, StrategyChain,
    StrategyKind,
};

// Re-export from core for convenience
pub use munch_core::{
    DetectionThresholds, LanguageDistribution, LanguageInfo, LanguageProfile, LanguageRegistry,
};

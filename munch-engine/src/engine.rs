//! Chunking engine façade
//!
//! Wires detection, the strategy chain and post-processing together behind
//! a small API. An engine owns its configuration and borrows its registry;
//! `chunk` takes `&self`, `configure` takes `&mut self`, so a configuration
//! change can never overlap an in-flight call.

use munch_core::{
    normalize, select_strategy, DetectionThresholds, LanguageDistribution, LanguageInfo,
    LanguageRegistry,
};
use serde::Serialize;

use crate::config::{BoundaryPolicy, ChunkingConfig};
use crate::error::Result;
use crate::postprocess::ChunkPostProcessor;
use crate::strategies::{ChunkContext, StrategyChain, StrategyKind};

/// Chunks with a description of how they were produced
#[derive(Debug, Clone, Serialize)]
pub struct ChunkOutput {
    pub chunks: Vec<String>,
    pub metadata: ChunkingMetadata,
}

/// How a chunking call went
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChunkingMetadata {
    /// Strategy whose output was kept; `None` for empty input
    pub strategy: Option<StrategyKind>,
    /// Whether the first strategy of the chain was rejected
    pub fallback_used: bool,
    /// Code of the document's primary language
    pub primary_language: String,
    /// Whether more than one language passed the mixed threshold
    pub mixed_language: bool,
    pub distribution: LanguageDistribution,
    /// Chunk count before post-processing
    pub raw_chunk_count: usize,
}

/// Multilingual semantic chunking engine
///
/// # Example
///
/// ```rust
/// use munch_engine::ChunkingEngine;
///
/// let engine = ChunkingEngine::new();
/// let chunks = engine.chunk("AI is changing healthcare. It helps doctors make better decisions.");
/// assert_eq!(chunks.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkingEngine<'r> {
    registry: &'r LanguageRegistry,
    config: ChunkingConfig,
    policy: BoundaryPolicy,
    thresholds: DetectionThresholds,
}

impl Default for ChunkingEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkingEngine<'static> {
    /// Engine over the builtin registry with default settings
    pub fn new() -> Self {
        Self::with_registry(LanguageRegistry::builtin())
    }

    /// Start building an engine
    pub fn builder() -> ChunkingEngineBuilder<'static> {
        ChunkingEngineBuilder::new()
    }
}

impl<'r> ChunkingEngine<'r> {
    /// Engine over a custom registry with default settings
    pub fn with_registry(registry: &'r LanguageRegistry) -> Self {
        Self {
            registry,
            config: ChunkingConfig::default(),
            policy: BoundaryPolicy::default(),
            thresholds: DetectionThresholds::default(),
        }
    }

    /// Replace the length configuration
    ///
    /// Requires `0 < min_length < target_length < max_length`; on error the
    /// previous configuration stays active.
    pub fn configure(
        &mut self,
        target_length: usize,
        max_length: usize,
        min_length: usize,
    ) -> Result<()> {
        self.config = ChunkingConfig::new(target_length, max_length, min_length)?;
        Ok(())
    }

    /// Replace the whole configuration
    pub fn set_config(&mut self, config: ChunkingConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub fn policy(&self) -> &BoundaryPolicy {
        &self.policy
    }

    pub fn thresholds(&self) -> &DetectionThresholds {
        &self.thresholds
    }

    pub fn registry(&self) -> &'r LanguageRegistry {
        self.registry
    }

    /// Registered languages in registry order
    pub fn supported_languages(&self) -> Vec<LanguageInfo> {
        self.registry.supported_languages()
    }

    /// Split `text` into ordered, length-bounded chunks
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_with_metadata(text).chunks
    }

    /// Split `text` and report which strategy produced the chunks
    pub fn chunk_with_metadata(&self, text: &str) -> ChunkOutput {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return ChunkOutput {
                chunks: Vec::new(),
                metadata: ChunkingMetadata {
                    primary_language: self.registry.fallback().code().to_string(),
                    ..Default::default()
                },
            };
        }

        let distribution = LanguageDistribution::detect(&normalized, self.registry);
        let strategy = select_strategy(&distribution, self.registry, &self.thresholds);

        let ctx = ChunkContext {
            registry: self.registry,
            primary: strategy.primary,
            config: &self.config,
            policy: &self.policy,
            thresholds: &self.thresholds,
        };

        let chain = if strategy.is_mixed {
            StrategyChain::mixed_language(self.policy.min_mixed_chunks)
        } else {
            StrategyChain::single_language()
        };

        tracing::debug!(
            language = strategy.primary.code(),
            mixed = strategy.is_mixed,
            chars = normalized.chars().count(),
            "chunking document"
        );

        let (raw, kind, fallback_used) = match chain.run(&normalized, &ctx) {
            Some(outcome) => (outcome.chunks, Some(outcome.kind), outcome.fallback_used),
            None => (Vec::new(), None, false),
        };
        let raw_chunk_count = raw.len();
        let chunks = ChunkPostProcessor::new(&self.config, &self.policy).process(raw);

        ChunkOutput {
            chunks,
            metadata: ChunkingMetadata {
                strategy: kind,
                fallback_used,
                primary_language: strategy.primary.code().to_string(),
                mixed_language: strategy.is_mixed,
                distribution,
                raw_chunk_count,
            },
        }
    }
}

/// Builder for [`ChunkingEngine`]
#[derive(Debug, Clone)]
pub struct ChunkingEngineBuilder<'r> {
    registry: &'r LanguageRegistry,
    config: ChunkingConfig,
    policy: BoundaryPolicy,
    thresholds: DetectionThresholds,
}

impl Default for ChunkingEngineBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkingEngineBuilder<'static> {
    /// Create a new builder over the builtin registry
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::builtin(),
            config: ChunkingConfig::default(),
            policy: BoundaryPolicy::default(),
            thresholds: DetectionThresholds::default(),
        }
    }
}

impl<'r> ChunkingEngineBuilder<'r> {
    /// Use a different registry
    pub fn registry<'n>(self, registry: &'n LanguageRegistry) -> ChunkingEngineBuilder<'n> {
        ChunkingEngineBuilder {
            registry,
            config: self.config,
            policy: self.policy,
            thresholds: self.thresholds,
        }
    }

    /// Set the length configuration
    pub fn config(mut self, config: ChunkingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the boundary heuristics
    pub fn policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the detection thresholds
    pub fn thresholds(mut self, thresholds: DetectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Build the engine
    pub fn build(self) -> ChunkingEngine<'r> {
        ChunkingEngine {
            registry: self.registry,
            config: self.config,
            policy: self.policy,
            thresholds: self.thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChunkingEngine<'static>>();
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let engine = ChunkingEngine::new();
        assert!(engine.chunk("").is_empty());
        assert!(engine.chunk("   \n\n\t ").is_empty());

        let output = engine.chunk_with_metadata("... !!! 123");
        assert!(output.chunks.is_empty());
        assert_eq!(output.metadata.primary_language, "en");
    }

    #[test]
    fn test_configure_validates() {
        let mut engine = ChunkingEngine::new();
        assert!(engine.configure(300, 600, 80).is_ok());
        assert_eq!(engine.config().max_length(), 600);

        assert!(engine.configure(600, 300, 80).is_err());
        assert_eq!(engine.config().max_length(), 600);
    }

    #[test]
    fn test_supported_languages() {
        let engine = ChunkingEngine::new();
        let names: Vec<String> = engine
            .supported_languages()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["English", "Spanish", "Chinese", "Japanese", "Korean"]);
    }

    #[test]
    fn test_builder_overrides() {
        let engine = ChunkingEngine::builder()
            .config(ChunkingConfig::new(300, 500, 60).unwrap())
            .policy(BoundaryPolicy {
                min_mixed_chunks: 2,
                ..Default::default()
            })
            .build();
        assert_eq!(engine.config().target_length(), 300);
        assert_eq!(engine.policy().min_mixed_chunks, 2);
    }
}

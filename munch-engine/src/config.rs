//! Configuration types for the engine

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Default configuration constants
pub mod defaults {
    /// Preferred chunk length in characters
    pub const TARGET_LENGTH: usize = 500;

    /// Hard ceiling for the boundary decider, in characters
    pub const MAX_LENGTH: usize = 800;

    /// Chunks shorter than this are merged by the post-processor
    pub const MIN_LENGTH: usize = 100;
}

/// Length bounds for one chunking call
///
/// Always satisfies `0 < min_length < target_length < max_length`; the only
/// ways to obtain one validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChunkingConfigBuilder")]
pub struct ChunkingConfig {
    target_length: usize,
    max_length: usize,
    min_length: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_length: defaults::TARGET_LENGTH,
            max_length: defaults::MAX_LENGTH,
            min_length: defaults::MIN_LENGTH,
        }
    }
}

impl ChunkingConfig {
    /// Create a validated configuration
    pub fn new(target_length: usize, max_length: usize, min_length: usize) -> Result<Self> {
        let config = Self {
            target_length,
            max_length,
            min_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder
    pub fn builder() -> ChunkingConfigBuilder {
        ChunkingConfigBuilder::default()
    }

    /// Read the `[chunking]` table of a TOML document
    ///
    /// Missing keys fall back to the defaults. A document without the table
    /// yields the default configuration.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            chunking: ChunkingConfigBuilder,
        }

        let document: Document = toml::from_str(toml_str)?;
        document.chunking.build()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(EngineError::InvalidConfig(
                "min_length must be greater than 0".into(),
            ));
        }
        if self.min_length >= self.target_length {
            return Err(EngineError::InvalidConfig(format!(
                "min_length ({}) must be less than target_length ({})",
                self.min_length, self.target_length
            )));
        }
        if self.target_length >= self.max_length {
            return Err(EngineError::InvalidConfig(format!(
                "target_length ({}) must be less than max_length ({})",
                self.target_length, self.max_length
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`ChunkingConfig`]
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChunkingConfigBuilder {
    target_length: Option<usize>,
    max_length: Option<usize>,
    min_length: Option<usize>,
}

impl ChunkingConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred chunk length
    pub fn target_length(mut self, chars: usize) -> Self {
        self.target_length = Some(chars);
        self
    }

    /// Set the hard ceiling
    pub fn max_length(mut self, chars: usize) -> Self {
        self.max_length = Some(chars);
        self
    }

    /// Set the merge threshold
    pub fn min_length(mut self, chars: usize) -> Self {
        self.min_length = Some(chars);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChunkingConfig> {
        ChunkingConfig::new(
            self.target_length.unwrap_or(defaults::TARGET_LENGTH),
            self.max_length.unwrap_or(defaults::MAX_LENGTH),
            self.min_length.unwrap_or(defaults::MIN_LENGTH),
        )
    }
}

impl TryFrom<ChunkingConfigBuilder> for ChunkingConfig {
    type Error = EngineError;

    fn try_from(builder: ChunkingConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

/// Heuristic thresholds of the boundary decider and post-processor
///
/// All lengths are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryPolicy {
    /// Below this chunk length no break happens except a forced one
    pub suppress_below: usize,
    /// A transition sentence breaks a chunk longer than this
    pub transition_break_after: usize,
    /// Topic drift breaks a chunk longer than this
    pub topic_break_after: usize,
    /// Reaching the target length breaks a chunk longer than this
    pub target_break_after: usize,
    /// The post-processor flushes an accumulator longer than this
    pub accumulator_flush_after: usize,
    /// Shortest chunk that survives post-processing
    pub min_output_chars: usize,
    /// Shortest paragraph considered by the mixed-language path
    pub min_paragraph_chars: usize,
    /// Shortest chunk kept by the universal fallback
    pub min_universal_chars: usize,
    /// Chunks the mixed-language path must produce to be accepted
    pub min_mixed_chunks: usize,
    /// Post-processed chunks never exceed `max_length * overflow_factor`
    pub overflow_factor: f64,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            suppress_below: 200,
            transition_break_after: 300,
            topic_break_after: 400,
            target_break_after: 300,
            accumulator_flush_after: 100,
            min_output_chars: 30,
            min_paragraph_chars: 50,
            min_universal_chars: 30,
            min_mixed_chunks: 3,
            overflow_factor: 1.2,
        }
    }
}

impl BoundaryPolicy {
    /// Post-processing ceiling for `config`
    pub fn overflow_ceiling(&self, config: &ChunkingConfig) -> usize {
        (config.max_length() as f64 * self.overflow_factor).floor() as usize
    }
}

//! Language profiles and sentence-level signals for semantic chunking
//!
//! This crate is the domain layer of the munch chunker. It knows how to tell
//! languages apart by character class, how each language ends a sentence,
//! and which words hint at a change of subject. It knows nothing about chunk
//! sizes; that is the job of `munch-engine`.
//!
//! # Architecture
//!
//! - **language**: TOML-defined [`LanguageProfile`]s and the [`LanguageRegistry`]
//! - **detection**: character-class [`LanguageDistribution`] and strategy selection
//! - **sentence**: punctuation-driven [`SentenceSplitter`]
//! - **signals**: transition markers and topic keyword drift
//!
//! # Example
//!
//! ```rust
//! use munch_core::{DetectionThresholds, LanguageDistribution, LanguageRegistry, select_strategy};
//!
//! let registry = LanguageRegistry::builtin();
//! let text = "AI is changing healthcare. It helps doctors make better decisions.";
//!
//! let distribution = LanguageDistribution::detect(text, registry);
//! let strategy = select_strategy(&distribution, registry, &DetectionThresholds::default());
//!
//! assert!(!strategy.is_mixed);
//! assert_eq!(strategy.primary.code(), "en");
//! ```

pub mod detection;
pub mod error;
pub mod language;
pub mod normalize;
pub mod sentence;
pub mod signals;

pub use detection::{
    primary_profile, select_strategy, DetectionThresholds, LanguageDistribution, LanguageShare,
    LanguageStrategy,
};
pub use error::{CoreError, Result};
pub use language::{
    Absorption, LanguageInfo, LanguageProfile, LanguageRegistry, Script, DEFAULT_FALLBACK,
};
pub use normalize::{char_len, normalize};
pub use sentence::SentenceSplitter;
pub use signals::{extract_topic_keywords, has_transition_signal, is_topic_change, TopicKeywords};

//! Language profiles for multilingual chunking
//!
//! Profiles are declared in TOML (see `configs/languages/`), compiled once
//! into [`LanguageProfile`] values and collected in a [`LanguageRegistry`].
//!
//! # Usage
//!
//! ```rust
//! use munch_core::language::LanguageRegistry;
//!
//! let registry = LanguageRegistry::builtin();
//! let english = registry.profile_or_fallback("en");
//! assert_eq!(english.sentence_separator(), ". ");
//! ```

pub mod config;
pub mod profile;
pub mod registry;

pub use config::{Absorption, LanguageConfig, Script};
pub use profile::{is_terminal_punctuation, LanguageProfile};
pub use registry::{LanguageInfo, LanguageRegistry, DEFAULT_FALLBACK};

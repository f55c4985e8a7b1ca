//! Layered error types
//!
//! Chunking itself never fails; only configuration and registry
//! construction do.

use munch_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core profile or registry error
    #[error("language profile error: {0}")]
    Core(#[from] CoreError),

    /// Length parameters violate `0 < min < target < max`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

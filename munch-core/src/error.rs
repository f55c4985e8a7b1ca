//! Core error types
//!
//! Only profile loading and registry construction can fail. Text processing
//! in this crate is total.

use thiserror::Error;

/// Errors raised while building language profiles and registries
#[derive(Debug, Error)]
pub enum CoreError {
    /// A profile definition is structurally invalid
    #[error("invalid language profile '{code}': {reason}")]
    InvalidProfile {
        /// Code of the offending profile (may be empty)
        code: String,
        /// What is wrong with it
        reason: String,
    },

    /// One of the profile's regular expressions does not compile
    #[error("invalid pattern for '{code}': {pattern}")]
    InvalidPattern {
        /// Code of the offending profile
        code: String,
        /// The pattern source
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A TOML profile could not be parsed
    #[error("failed to parse language profile: {0}")]
    ProfileParse(#[from] toml::de::Error),

    /// The same language code was registered twice
    #[error("language '{0}' registered more than once")]
    DuplicateLanguage(String),

    /// A language code is not present in the registry
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::UnsupportedLanguage("xx".to_string());
        assert_eq!(error.to_string(), "unsupported language: xx");

        let error = CoreError::InvalidProfile {
            code: "en".to_string(),
            reason: "empty name".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid language profile 'en': empty name"
        );
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        let source = regex::Regex::new("[").unwrap_err();
        let error = CoreError::InvalidPattern {
            code: "en".to_string(),
            pattern: "[".to_string(),
            source,
        };
        assert!(std::error::Error::source(&error).is_some());
    }
}

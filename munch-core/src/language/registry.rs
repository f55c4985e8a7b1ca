//! Language profile registry
//!
//! Holds the immutable set of profiles an engine segments with. The builtin
//! registry is parsed from embedded TOML once per process; custom registries
//! are plain values and can be injected anywhere a reference is accepted.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::profile::LanguageProfile;
use crate::error::{CoreError, Result};

/// Code of the language substituted when detection has no usable signal
pub const DEFAULT_FALLBACK: &str = "en";

static BUILTIN: OnceLock<LanguageRegistry> = OnceLock::new();

macro_rules! embed_language_config {
    ($path:expr) => {
        include_str!(concat!("../../configs/languages/", $path))
    };
}

/// Embedded profiles, in `supported_languages` order
const EMBEDDED_PROFILES: [&str; 5] = [
    embed_language_config!("english.toml"),
    embed_language_config!("spanish.toml"),
    embed_language_config!("chinese.toml"),
    embed_language_config!("japanese.toml"),
    embed_language_config!("korean.toml"),
];

/// Code and display name of a registered language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Ordered, immutable collection of language profiles
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    profiles: Vec<LanguageProfile>,
    fallback: usize,
    universal_sentence_end: Regex,
}

impl LanguageRegistry {
    /// The process-wide registry built from the embedded profiles
    pub fn builtin() -> &'static LanguageRegistry {
        BUILTIN.get_or_init(|| {
            Self::from_toml_strs(&EMBEDDED_PROFILES, DEFAULT_FALLBACK)
                .expect("embedded language profiles are valid")
        })
    }

    /// Build a registry from compiled profiles
    ///
    /// `fallback_code` must name one of the profiles.
    pub fn from_profiles(profiles: Vec<LanguageProfile>, fallback_code: &str) -> Result<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.code() == profile.code()) {
                return Err(CoreError::DuplicateLanguage(profile.code().to_string()));
            }
        }

        let fallback = profiles
            .iter()
            .position(|p| p.code().eq_ignore_ascii_case(fallback_code))
            .ok_or_else(|| CoreError::UnsupportedLanguage(fallback_code.to_string()))?;

        let union = profiles
            .iter()
            .map(|p| format!("(?:{})", p.sentence_end().as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let universal_sentence_end =
            Regex::new(&union).map_err(|source| CoreError::InvalidPattern {
                code: "*".to_string(),
                pattern: union.clone(),
                source,
            })?;

        Ok(Self {
            profiles,
            fallback,
            universal_sentence_end,
        })
    }

    /// Parse, compile and register TOML profiles in order
    pub fn from_toml_strs(sources: &[&str], fallback_code: &str) -> Result<Self> {
        let profiles = sources
            .iter()
            .map(|source| LanguageProfile::from_toml_str(source))
            .collect::<Result<Vec<_>>>()?;
        Self::from_profiles(profiles, fallback_code)
    }

    /// Look up a profile by code (case-insensitive)
    pub fn get(&self, code: &str) -> Option<&LanguageProfile> {
        self.profiles
            .iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Look up a profile, failing for unknown codes
    pub fn require(&self, code: &str) -> Result<&LanguageProfile> {
        self.get(code)
            .ok_or_else(|| CoreError::UnsupportedLanguage(code.to_string()))
    }

    /// Look up a profile, substituting the fallback for unknown codes
    pub fn profile_or_fallback(&self, code: &str) -> &LanguageProfile {
        match self.get(code) {
            Some(profile) => profile,
            None => {
                let fallback = self.fallback();
                tracing::warn!(
                    requested = code,
                    fallback = fallback.code(),
                    "language profile not registered, using fallback"
                );
                fallback
            }
        }
    }

    /// The designated fallback profile
    pub fn fallback(&self) -> &LanguageProfile {
        &self.profiles[self.fallback]
    }

    /// All profiles in registration order
    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Codes and display names in registration order
    pub fn supported_languages(&self) -> Vec<LanguageInfo> {
        self.profiles
            .iter()
            .map(|p| LanguageInfo {
                code: p.code().to_string(),
                name: p.name().to_string(),
            })
            .collect()
    }

    /// Union of every registered sentence terminator
    pub fn universal_sentence_end(&self) -> &Regex {
        &self.universal_sentence_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(code: &str) -> String {
        format!(
            r#"
            [metadata]
            code = "{code}"
            name = "Lang {code}"

            [patterns]
            sentence_end = '[.]+'
            char_class = '[a-z]'
            word = '[a-z]+'
            "#
        )
    }

    #[test]
    fn test_builtin_languages() {
        let registry = LanguageRegistry::builtin();
        let codes: Vec<String> = registry
            .supported_languages()
            .into_iter()
            .map(|info| info.code)
            .collect();
        assert_eq!(codes, vec!["en", "es", "zh", "ja", "ko"]);
        assert_eq!(registry.fallback().code(), "en");
    }

    #[test]
    fn test_builtin_is_shared() {
        let first = LanguageRegistry::builtin();
        let second = LanguageRegistry::builtin();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.get("JA").map(|p| p.name()), Some("Japanese"));
        assert!(registry.get("fr").is_none());
        assert!(matches!(
            registry.require("fr"),
            Err(CoreError::UnsupportedLanguage(code)) if code == "fr"
        ));
    }

    #[test]
    fn test_unknown_code_uses_fallback() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.profile_or_fallback("tlh").code(), "en");
        assert_eq!(registry.profile_or_fallback("ko").code(), "ko");
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let a = tiny("aa");
        let result = LanguageRegistry::from_toml_strs(&[&a, &a], "aa");
        assert!(matches!(result, Err(CoreError::DuplicateLanguage(code)) if code == "aa"));
    }

    #[test]
    fn test_fallback_must_be_registered() {
        let a = tiny("aa");
        let result = LanguageRegistry::from_toml_strs(&[&a], "bb");
        assert!(matches!(result, Err(CoreError::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_universal_pattern_covers_all_scripts() {
        let registry = LanguageRegistry::builtin();
        let pattern = registry.universal_sentence_end();
        assert!(pattern.is_match("Done. Next"));
        assert!(pattern.is_match("終わり。次"));
        assert!(!pattern.is_match("rate 0.25%"));
    }
}

//! Configuration structures and validation
//!
//! This module defines the TOML schema for language profiles. A schema value
//! is plain data; [`LanguageProfile::from_config`](super::LanguageProfile::from_config)
//! compiles it into the immutable runtime form.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Root language profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub patterns: Patterns,
    #[serde(default)]
    pub lexicon: Lexicon,
    #[serde(default)]
    pub detection: Option<Absorption>,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub script: Script,
}

/// Writing system family, which decides how sentences are glued together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Space-separated alphabetic scripts, `". "` between sentences
    #[default]
    Latin,
    /// CJK and Hangul style scripts, full-width `。` and no space
    Cjk,
}

impl Script {
    /// Script family of a single character
    pub fn of_char(ch: char) -> Self {
        let code = ch as u32;
        let wide = (0x3000..=0x30FF).contains(&code) // CJK punctuation, kana
            || (0x3400..=0x4DBF).contains(&code) // CJK Extension A
            || (0x4E00..=0x9FFF).contains(&code) // CJK Unified Ideographs
            || (0x1100..=0x11FF).contains(&code) // Hangul Jamo
            || (0x3130..=0x318F).contains(&code) // Hangul Compatibility Jamo
            || (0xAC00..=0xD7AF).contains(&code) // Hangul Syllables
            || (0xFF00..=0xFFEF).contains(&code); // full-width forms
        if wide {
            Script::Cjk
        } else {
            Script::Latin
        }
    }

    /// Script family of the last character of `text`
    pub fn of_tail(text: &str) -> Self {
        text.trim_end()
            .chars()
            .next_back()
            .map_or(Script::Latin, Script::of_char)
    }

    /// Separator placed between sentences folded into one chunk
    pub fn sentence_separator(self) -> &'static str {
        match self {
            Script::Latin => ". ",
            Script::Cjk => "。",
        }
    }

    /// Separator placed between two already finalized chunks
    pub fn chunk_separator(self) -> &'static str {
        match self {
            Script::Latin => " ",
            Script::Cjk => "",
        }
    }

    /// Terminator appended to a chunk that lacks one
    pub fn terminator(self) -> char {
        match self {
            Script::Latin => '.',
            Script::Cjk => '。',
        }
    }
}

/// Regular expressions driving detection and splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patterns {
    /// Sentence terminator; a match consumes the punctuation
    pub sentence_end: String,
    /// Matches exactly one in-language character
    pub char_class: String,
    /// Matches one word token
    pub word: String,
}

/// Word lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<String>,
}

/// Reassigns another language's characters to this one
///
/// Some languages share a character class with a neighbour (Spanish prose is
/// mostly ASCII letters, Japanese prose is mostly Han). The profile's own
/// class then only holds its marker characters, and once enough markers are
/// present the neighbour's whole count is attributed to this language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absorption {
    /// Code of the language whose count is taken over
    pub absorbs: String,
    /// Marker characters required before anything is reassigned
    #[serde(default = "default_min_markers")]
    pub min_markers: usize,
    /// Markers required per character of the absorbed language
    #[serde(default)]
    pub min_ratio: f64,
}

fn default_min_markers() -> usize {
    1
}

impl Absorption {
    /// Whether `markers` own characters justify taking over `absorbed` ones
    pub fn applies(&self, markers: usize, absorbed: usize) -> bool {
        absorbed > 0
            && markers >= self.min_markers.max(1)
            && markers as f64 >= self.min_ratio * absorbed as f64
    }
}

impl LanguageConfig {
    /// Parse a profile from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CoreError::InvalidProfile {
            code: self.metadata.code.clone(),
            reason: reason.to_string(),
        };

        if self.metadata.code.trim().is_empty() {
            return Err(invalid("language code is empty"));
        }
        if self.metadata.name.trim().is_empty() {
            return Err(invalid("language name is empty"));
        }
        if self.patterns.sentence_end.is_empty() {
            return Err(invalid("no sentence terminator pattern defined"));
        }
        if self.patterns.char_class.is_empty() || self.patterns.word.is_empty() {
            return Err(invalid("character class and word patterns are required"));
        }
        if let Some(rule) = &self.detection {
            let target = rule.absorbs.trim();
            if target.is_empty() || target.eq_ignore_ascii_case(self.metadata.code.trim()) {
                return Err(invalid("a profile must absorb another language"));
            }
            if !rule.min_ratio.is_finite() || rule.min_ratio < 0.0 {
                return Err(invalid("absorption ratio must be a non-negative number"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [metadata]
        code = "xx"
        name = "Sample"
        script = "cjk"

        [patterns]
        sentence_end = '[。]+'
        char_class = '\p{Han}'
        word = '\p{Han}{2}'

        [lexicon]
        stop_words = ["我们"]
        transitions = ["然而"]
    "#;

    #[test]
    fn test_language_config_deserialize() {
        let config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.metadata.code, "xx");
        assert_eq!(config.metadata.script, Script::Cjk);
        assert_eq!(config.lexicon.stop_words, vec!["我们"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_script_and_lexicon_default() {
        let config = LanguageConfig::from_toml_str(
            r#"
            [metadata]
            code = "yy"
            name = "Minimal"

            [patterns]
            sentence_end = '[.]'
            char_class = '[a-z]'
            word = '[a-z]+'
            "#,
        )
        .unwrap();
        assert_eq!(config.metadata.script, Script::Latin);
        assert!(config.lexicon.transitions.is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        config.metadata.name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidProfile { .. })
        ));

        let mut config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        config.patterns.sentence_end.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_script_of_char() {
        assert_eq!(Script::of_char('a'), Script::Latin);
        assert_eq!(Script::of_char('é'), Script::Latin);
        assert_eq!(Script::of_char('語'), Script::Cjk);
        assert_eq!(Script::of_char('か'), Script::Cjk);
        assert_eq!(Script::of_char('한'), Script::Cjk);
        assert_eq!(Script::of_char('。'), Script::Cjk);
        assert_eq!(Script::of_tail("終わり。 "), Script::Cjk);
        assert_eq!(Script::of_tail(""), Script::Latin);
    }

    #[test]
    fn test_absorption_rule() {
        let config = LanguageConfig::from_toml_str(
            r#"
            [metadata]
            code = "es"
            name = "Spanish"

            [patterns]
            sentence_end = '[.]'
            char_class = '[ñ]'
            word = '[a-zñ]+'

            [detection]
            absorbs = "en"
            min_markers = 2
            min_ratio = 0.02
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        let rule = config.detection.unwrap();
        assert!(rule.applies(2, 100));
        assert!(!rule.applies(1, 10));
        assert!(!rule.applies(2, 1000));
        assert!(!rule.applies(5, 0));
    }

    #[test]
    fn test_absorbing_itself_is_invalid() {
        let mut config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        config.detection = Some(Absorption {
            absorbs: "XX".to_string(),
            min_markers: 1,
            min_ratio: 0.0,
        });
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = LanguageConfig::from_toml_str("[metadata]\ncode = ");
        assert!(matches!(result, Err(CoreError::ProfileParse(_))));
    }
}

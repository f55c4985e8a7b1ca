//! Compiled, immutable language profiles

use std::collections::HashSet;

use regex::Regex;

use super::config::{Absorption, LanguageConfig, Script};
use crate::error::{CoreError, Result};

/// Linguistic resources needed to segment one language
///
/// Built once from a [`LanguageConfig`] and never mutated afterwards. Stop
/// words and transitions are stored lower-cased.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: String,
    name: String,
    script: Script,
    sentence_end: Regex,
    char_class: Regex,
    word: Regex,
    stop_words: HashSet<String>,
    transitions: Vec<String>,
    absorption: Option<Absorption>,
}

impl LanguageProfile {
    /// Compile a validated configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;

        let code = config.metadata.code.trim().to_lowercase();
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
                code: code.clone(),
                pattern: pattern.to_string(),
                source,
            })
        };

        let sentence_end = compile(&config.patterns.sentence_end)?;
        let char_class = compile(&config.patterns.char_class)?;
        let word = compile(&config.patterns.word)?;

        let stop_words = config
            .lexicon
            .stop_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let transitions = config
            .lexicon
            .transitions
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let absorption = config.detection.clone().map(|rule| Absorption {
            absorbs: rule.absorbs.trim().to_lowercase(),
            ..rule
        });

        Ok(Self {
            code,
            name: config.metadata.name.trim().to_string(),
            script: config.metadata.script,
            sentence_end,
            char_class,
            word,
            stop_words,
            transitions,
            absorption,
        })
    }

    /// Parse and compile a profile from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Self::from_config(&LanguageConfig::from_toml_str(toml_str)?)
    }

    /// Language code, lower-cased (e.g. `"en"`)
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name (e.g. `"English"`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Sentence terminator pattern
    pub fn sentence_end(&self) -> &Regex {
        &self.sentence_end
    }

    /// Word extraction pattern
    pub fn word_pattern(&self) -> &Regex {
        &self.word
    }

    /// Transition lexicon in declaration order
    pub fn transitions(&self) -> &[String] {
        &self.transitions
    }

    /// Whether `word` (already lower-cased) is a stop word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Rule for taking over a neighbouring language's characters
    pub fn absorption(&self) -> Option<&Absorption> {
        self.absorption.as_ref()
    }

    /// Number of in-language characters in `text`
    pub fn count_chars(&self, text: &str) -> usize {
        self.char_class.find_iter(text).count()
    }

    /// Separator placed between sentences folded into one chunk
    pub fn sentence_separator(&self) -> &'static str {
        self.script.sentence_separator()
    }

    /// Terminator appended to a chunk that lacks one
    pub fn terminator(&self) -> char {
        self.script.terminator()
    }

    /// Trim `chunk` and make sure it ends with sentence punctuation
    pub fn finalize(&self, chunk: &str) -> String {
        let trimmed = chunk.trim();
        let mut out = trimmed.to_string();
        if !trimmed.is_empty() && !trimmed.ends_with(is_terminal_punctuation) {
            out.push(self.terminator());
        }
        out
    }
}

/// Sentence-final punctuation recognised for every script
pub fn is_terminal_punctuation(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？' | '…')
}

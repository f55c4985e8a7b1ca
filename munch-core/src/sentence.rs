//! Sentence splitting on profile punctuation

use regex::Regex;

use crate::detection::DetectionThresholds;
use crate::language::{LanguageProfile, LanguageRegistry};
use crate::normalize::{char_len, collapse_whitespace};

/// Splits text into candidate sentences
///
/// A terminator match consumes the punctuation (and trailing whitespace).
/// Pieces are trimmed, internal whitespace is collapsed, and fragments of at
/// most `noise_max_chars` characters are discarded as noise.
#[derive(Debug, Clone, Copy)]
pub struct SentenceSplitter<'p> {
    pattern: &'p Regex,
    noise_max_chars: usize,
}

impl<'p> SentenceSplitter<'p> {
    /// Split with one profile's terminators
    pub fn for_profile(profile: &'p LanguageProfile, thresholds: &DetectionThresholds) -> Self {
        Self {
            pattern: profile.sentence_end(),
            noise_max_chars: thresholds.noise_max_chars,
        }
    }

    /// Split with the union of every registered terminator
    pub fn universal(registry: &'p LanguageRegistry, thresholds: &DetectionThresholds) -> Self {
        Self {
            pattern: registry.universal_sentence_end(),
            noise_max_chars: thresholds.noise_max_chars,
        }
    }

    /// Lazily yield the sentences of `text` in order
    pub fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern
            .split(text)
            .map(|piece| collapse_whitespace(piece.trim()))
            .filter(move |sentence| {
                let length = char_len(sentence);
                let keep = length > self.noise_max_chars;
                if !keep && length > 0 {
                    tracing::debug!(
                        length,
                        fragment = %sentence,
                        "dropping sentence fragment as noise"
                    );
                }
                keep
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> &'static LanguageProfile {
        LanguageRegistry::builtin().get("en").unwrap()
    }

    #[test]
    fn test_basic_two_sentence_split() {
        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::for_profile(english(), &thresholds);
        let sentences: Vec<String> = splitter
            .split("AI is changing healthcare. It helps doctors make better decisions.")
            .collect();
        assert_eq!(
            sentences,
            vec![
                "AI is changing healthcare",
                "It helps doctors make better decisions"
            ]
        );
    }

    #[test]
    fn test_decimal_point_is_not_a_boundary() {
        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::for_profile(english(), &thresholds);
        let sentences: Vec<String> = splitter
            .split("The bank announced a 0.25% interest rate increase. Markets reacted calmly!")
            .collect();
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("0.25%"));
    }

    #[test]
    fn test_short_fragments_dropped() {
        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::for_profile(english(), &thresholds);
        let sentences: Vec<String> = splitter
            .split("Yes. No. This one is long enough to keep.")
            .collect();
        assert_eq!(sentences, vec!["This one is long enough to keep"]);
    }

    #[test]
    fn test_dropped_fragments_are_logged() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::for_profile(english(), &thresholds);
        let sentences: Vec<String> = tracing::subscriber::with_default(subscriber, || {
            splitter
                .split("Short one. This one is long enough to keep.")
                .collect()
        });

        assert_eq!(sentences, vec!["This one is long enough to keep"]);
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("dropping sentence fragment as noise"));
        assert!(logs.contains("Short one"));
    }

    #[test]
    fn test_internal_newlines_collapsed() {
        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::for_profile(english(), &thresholds);
        let sentences: Vec<String> = splitter
            .split("A sentence that wraps\nacross two lines. Another sentence here.")
            .collect();
        assert_eq!(sentences[0], "A sentence that wraps across two lines");
    }

    #[test]
    fn test_cjk_full_width_terminators() {
        let thresholds = DetectionThresholds::default();
        let japanese = LanguageRegistry::builtin().get("ja").unwrap();
        let splitter = SentenceSplitter::for_profile(japanese, &thresholds);
        let sentences: Vec<String> = splitter
            .split("今日は本当にいい天気ですね。明日も晴れると天気予報で言っていました！")
            .collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "今日は本当にいい天気ですね");
    }

    #[test]
    fn test_universal_splitter_handles_both_scripts() {
        let thresholds = DetectionThresholds::default();
        let splitter = SentenceSplitter::universal(LanguageRegistry::builtin(), &thresholds);
        let sentences: Vec<String> = splitter
            .split("This is an English sentence. これは日本語の文章でございます。")
            .collect();
        assert_eq!(sentences.len(), 2);
    }
}

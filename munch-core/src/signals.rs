//! Sentence-level semantic signals for boundary decisions

use crate::detection::DetectionThresholds;
use crate::language::LanguageProfile;

/// Whether `sentence` contains a transition marker from the profile lexicon
///
/// Case-insensitive substring containment.
pub fn has_transition_signal(sentence: &str, profile: &LanguageProfile) -> bool {
    if profile.transitions().is_empty() {
        return false;
    }
    let lower = sentence.to_lowercase();
    profile
        .transitions()
        .iter()
        .any(|marker| lower.contains(marker.as_str()))
}

/// Up to a few lower-cased content words describing one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicKeywords(Vec<String>);

impl TopicKeywords {
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of keywords shared with `other`
    pub fn overlap(&self, other: &TopicKeywords) -> usize {
        self.0.iter().filter(|w| other.0.contains(w)).count()
    }
}

/// Extract topic keywords in order of appearance
///
/// Words are lower-cased; stop words, words shorter than the configured
/// minimum and repeats are skipped.
pub fn extract_topic_keywords(
    sentence: &str,
    profile: &LanguageProfile,
    thresholds: &DetectionThresholds,
) -> TopicKeywords {
    let mut keywords: Vec<String> = Vec::with_capacity(thresholds.max_keywords);

    for m in profile.word_pattern().find_iter(sentence) {
        if keywords.len() >= thresholds.max_keywords {
            break;
        }
        let word = m.as_str().to_lowercase();
        if word.chars().count() < thresholds.min_keyword_chars
            || profile.is_stop_word(&word)
            || keywords.contains(&word)
        {
            continue;
        }
        keywords.push(word);
    }

    TopicKeywords(keywords)
}

/// Whether the topic drifted between two keyword sets
///
/// Empty sets never signal a change, so content-free sentences cannot
/// trigger a break.
pub fn is_topic_change(
    previous: &TopicKeywords,
    current: &TopicKeywords,
    thresholds: &DetectionThresholds,
) -> bool {
    if previous.is_empty() || current.is_empty() {
        return false;
    }
    let denominator = previous.len().max(current.len()) as f64;
    let ratio = previous.overlap(current) as f64 / denominator;
    ratio < thresholds.topic_overlap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;

    fn profile(code: &str) -> &'static LanguageProfile {
        LanguageRegistry::builtin().get(code).unwrap()
    }

    fn keywords(words: &[&str]) -> TopicKeywords {
        TopicKeywords::new(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_transition_signal_case_insensitive() {
        let en = profile("en");
        assert!(has_transition_signal("HOWEVER, the results differ", en));
        assert!(has_transition_signal("Take, for example, the heart", en));
        assert!(!has_transition_signal("The heart pumps blood", en));
    }

    #[test]
    fn test_transition_signal_cjk() {
        assert!(has_transition_signal("しかし、結果は違った", profile("ja")));
        assert!(has_transition_signal("然而结果不同", profile("zh")));
        assert!(has_transition_signal("하지만 결과는 달랐다", profile("ko")));
    }

    #[test]
    fn test_extract_keywords_skips_stop_words() {
        let thresholds = DetectionThresholds::default();
        let kw = extract_topic_keywords(
            "The doctors use AI to review the scans of patients",
            profile("en"),
            &thresholds,
        );
        assert_eq!(kw.as_slice(), ["doctors", "use", "ai"]);
    }

    #[test]
    fn test_extract_keywords_drops_short_and_repeated_words() {
        let thresholds = DetectionThresholds::default();
        let kw = extract_topic_keywords("x Rust rust y compilers", profile("en"), &thresholds);
        assert_eq!(kw.as_slice(), ["rust", "compilers"]);
    }

    #[test]
    fn test_topic_change() {
        let thresholds = DetectionThresholds::default();
        let prev = keywords(&["heart", "blood", "pressure"]);
        assert!(!is_topic_change(&prev, &keywords(&["heart", "rate", "blood"]), &thresholds));
        assert!(is_topic_change(&prev, &keywords(&["stock", "market", "trade"]), &thresholds));
        assert!(is_topic_change(&prev, &keywords(&["stock"]), &thresholds));
    }

    #[test]
    fn test_empty_sets_never_change_topic() {
        let thresholds = DetectionThresholds::default();
        let prev = keywords(&["heart"]);
        assert!(!is_topic_change(&prev, &TopicKeywords::default(), &thresholds));
        assert!(!is_topic_change(&TopicKeywords::default(), &prev, &thresholds));
    }
}

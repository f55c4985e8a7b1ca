//! Language distribution detection and strategy selection
//!
//! The detector is a character-class counter, not a classifier: each
//! profile counts the characters its class matches, and shares are taken
//! over the sum of all counts. Digits, punctuation and whitespace belong to
//! no language. A profile with an [`Absorption`](crate::Absorption) rule
//! takes over its neighbour's count once its marker characters show up, so
//! accented Latin text reads as Spanish and kana-bearing Han text as Japanese.

use serde::Serialize;

use crate::language::{LanguageProfile, LanguageRegistry};

/// Heuristic thresholds used by detection and the sentence-level signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    /// A language above this share (percent) counts toward "mixed"
    pub mixed_percentage: f64,
    /// The strongest language must exceed this share to be trusted
    pub primary_percentage: f64,
    /// Sentence fragments of at most this many chars are noise
    pub noise_max_chars: usize,
    /// Keyword overlap ratio below which the topic has changed
    pub topic_overlap: f64,
    /// Keywords kept per sentence
    pub max_keywords: usize,
    /// Shortest keyword kept, in chars
    pub min_keyword_chars: usize,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            mixed_percentage: 15.0,
            primary_percentage: 20.0,
            noise_max_chars: 10,
            topic_overlap: 0.3,
            max_keywords: 3,
            min_keyword_chars: 2,
        }
    }
}

/// Character count and share for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub code: String,
    pub count: usize,
    /// Percentage of all recognized characters, in `[0, 100]`
    pub percentage: f64,
}

/// Per-language character shares of one input, in registry order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageDistribution {
    shares: Vec<LanguageShare>,
    total_relevant_chars: usize,
}

impl LanguageDistribution {
    /// Count each registered language's characters in `text`
    pub fn detect(text: &str, registry: &LanguageRegistry) -> Self {
        let mut counts: Vec<(String, usize)> = registry
            .profiles()
            .iter()
            .map(|p| (p.code().to_string(), p.count_chars(text)))
            .collect();
        absorb_neighbours(registry.profiles(), &mut counts);
        let total_relevant_chars = counts.iter().map(|(_, count)| count).sum::<usize>();

        let shares = counts
            .into_iter()
            .map(|(code, count)| LanguageShare {
                code,
                count,
                percentage: if total_relevant_chars == 0 {
                    0.0
                } else {
                    count as f64 / total_relevant_chars as f64 * 100.0
                },
            })
            .collect();

        Self {
            shares,
            total_relevant_chars,
        }
    }

    pub fn total_relevant_chars(&self) -> usize {
        self.total_relevant_chars
    }

    pub fn shares(&self) -> &[LanguageShare] {
        &self.shares
    }

    pub fn get(&self, code: &str) -> Option<&LanguageShare> {
        self.shares.iter().find(|s| s.code == code)
    }

    /// Share of `code`, 0 when unknown
    pub fn percentage(&self, code: &str) -> f64 {
        self.get(code).map_or(0.0, |s| s.percentage)
    }

    /// True iff more than one language exceeds the mixed threshold
    pub fn is_mixed(&self, thresholds: &DetectionThresholds) -> bool {
        self.shares
            .iter()
            .filter(|s| s.percentage > thresholds.mixed_percentage)
            .count()
            > 1
    }

    /// The strongest language, if its share is above the primary threshold
    ///
    /// Ties go to the language registered first.
    pub fn dominant(&self, thresholds: &DetectionThresholds) -> Option<&LanguageShare> {
        let best = self.shares.iter().fold(None::<&LanguageShare>, |best, s| match best {
            Some(b) if b.percentage >= s.percentage => Some(b),
            _ => Some(s),
        })?;
        (best.percentage > thresholds.primary_percentage).then_some(best)
    }
}

/// Apply every profile's absorption rule, in registry order
fn absorb_neighbours(profiles: &[LanguageProfile], counts: &mut [(String, usize)]) {
    for (index, profile) in profiles.iter().enumerate() {
        let Some(rule) = profile.absorption() else {
            continue;
        };
        let Some(target) = counts.iter().position(|(code, _)| *code == rule.absorbs) else {
            continue;
        };

        let markers = counts[index].1;
        let absorbed = counts[target].1;
        if rule.applies(markers, absorbed) {
            counts[index].1 += absorbed;
            counts[target].1 = 0;
        }
    }
}

/// Outcome of strategy selection for one input
#[derive(Debug, Clone, Copy)]
pub struct LanguageStrategy<'r> {
    /// Whether the mixed-language path should be tried first
    pub is_mixed: bool,
    /// Profile used by the single-language path
    pub primary: &'r LanguageProfile,
}

/// Decide single vs. mixed chunking and the primary profile
///
/// A weak signal (no share above the primary threshold, or no recognized
/// characters at all) resolves to the registry's fallback language.
pub fn select_strategy<'r>(
    distribution: &LanguageDistribution,
    registry: &'r LanguageRegistry,
    thresholds: &DetectionThresholds,
) -> LanguageStrategy<'r> {
    let primary = match distribution.dominant(thresholds) {
        Some(share) => registry.profile_or_fallback(&share.code),
        None => registry.fallback(),
    };

    LanguageStrategy {
        is_mixed: distribution.is_mixed(thresholds),
        primary,
    }
}

/// Primary profile of `text` on its own
pub fn primary_profile<'r>(
    text: &str,
    registry: &'r LanguageRegistry,
    thresholds: &DetectionThresholds,
) -> &'r LanguageProfile {
    let distribution = LanguageDistribution::detect(text, registry);
    select_strategy(&distribution, registry, thresholds).primary
}

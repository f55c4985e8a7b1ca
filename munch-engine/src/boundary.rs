//! Chunk boundary decisions
//!
//! Folds a sentence stream into chunks in a single left-to-right pass. The
//! decision for each sentence is a priority-ordered table:
//!
//! | priority | condition                                           | outcome  |
//! |----------|-----------------------------------------------------|----------|
//! | 1        | `current + separator + sentence + 1 > max_length`   | break    |
//! | 2        | `current < suppress_below`                          | no break |
//! | 3        | transition marker and `current > transition_break_after` | break |
//! | 4        | topic drift and `current > topic_break_after`       | break    |
//! | 5        | `current + sentence > target` and `current > target_break_after` | break |
//! | 6        | otherwise                                           | no break |
//!
//! The forced check measures the chunk as it would be finalized: joined with
//! the profile separator and closed with one terminator character.

use munch_core::{
    char_len, extract_topic_keywords, has_transition_signal, is_topic_change,
    DetectionThresholds, LanguageProfile, TopicKeywords,
};

use crate::config::{BoundaryPolicy, ChunkingConfig};

/// Why a chunk was closed before a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// The sentence would push the chunk past `max_length`
    Forced,
    /// The sentence opens with a discourse marker
    Transition,
    /// The sentence's keywords drifted away from the chunk's topic
    TopicDrift,
    /// The chunk reached its target length
    TargetLength,
}

/// Per-sentence signals fed to [`ChunkBoundaryDecider::decide`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSignals {
    pub has_transition: bool,
    pub topic_changed: bool,
}

/// Stateless boundary decider bound to one profile and configuration
#[derive(Debug, Clone, Copy)]
pub struct ChunkBoundaryDecider<'a> {
    profile: &'a LanguageProfile,
    config: &'a ChunkingConfig,
    policy: &'a BoundaryPolicy,
    thresholds: &'a DetectionThresholds,
}

impl<'a> ChunkBoundaryDecider<'a> {
    pub fn new(
        profile: &'a LanguageProfile,
        config: &'a ChunkingConfig,
        policy: &'a BoundaryPolicy,
        thresholds: &'a DetectionThresholds,
    ) -> Self {
        Self {
            profile,
            config,
            policy,
            thresholds,
        }
    }

    /// Decide whether to close the current chunk before the next sentence
    ///
    /// `current_len` and `sentence_len` are character counts. An empty
    /// current chunk is never broken, so a lone sentence longer than
    /// `max_length` passes through and is left to post-processing.
    pub fn decide(
        &self,
        current_len: usize,
        sentence_len: usize,
        signals: SentenceSignals,
    ) -> Option<BreakReason> {
        let policy = self.policy;

        if current_len == 0 {
            return None;
        }
        let finalized_len =
            current_len + char_len(self.profile.sentence_separator()) + sentence_len + 1;
        if finalized_len > self.config.max_length() {
            return Some(BreakReason::Forced);
        }
        if current_len < policy.suppress_below {
            return None;
        }
        if signals.has_transition && current_len > policy.transition_break_after {
            return Some(BreakReason::Transition);
        }
        if signals.topic_changed && current_len > policy.topic_break_after {
            return Some(BreakReason::TopicDrift);
        }
        if current_len + sentence_len > self.config.target_length()
            && current_len > policy.target_break_after
        {
            return Some(BreakReason::TargetLength);
        }
        None
    }

    /// Fold `sentences` into finalized chunks
    pub fn chunk<I>(&self, sentences: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;
        let mut current_topic = TopicKeywords::default();

        let separator = self.profile.sentence_separator();
        let separator_len = char_len(separator);

        for sentence in sentences {
            let sentence_len = char_len(&sentence);
            let topic_keywords = extract_topic_keywords(&sentence, self.profile, self.thresholds);
            let signals = SentenceSignals {
                has_transition: has_transition_signal(&sentence, self.profile),
                topic_changed: is_topic_change(&current_topic, &topic_keywords, self.thresholds),
            };

            match self.decide(current_len, sentence_len, signals) {
                Some(reason) => {
                    tracing::trace!(?reason, current_len, sentence_len, "chunk boundary");
                    chunks.push(self.profile.finalize(&current));
                    current = sentence;
                    current_len = sentence_len;
                    current_topic = topic_keywords;
                }
                None => {
                    if current_len > 0 {
                        current.push_str(separator);
                        current_len += separator_len;
                    }
                    current.push_str(&sentence);
                    current_len += sentence_len;
                    if current_topic.is_empty() {
                        current_topic = topic_keywords;
                    }
                }
            }
        }

        if current_len > 0 {
            chunks.push(self.profile.finalize(&current));
        }

        chunks
    }
}

//! Paragraph-level strategy for multi-language documents

use munch_core::normalize::collapse_whitespace;
use munch_core::{char_len, primary_profile, SentenceSplitter};

use super::{ChunkContext, ChunkingStrategy, StrategyKind};
use crate::boundary::ChunkBoundaryDecider;

/// Treats blank-line separated paragraphs as units
///
/// Each paragraph is classified on its own. Long paragraphs are re-chunked
/// with their own profile; mid-sized ones are kept whole; short ones are
/// dropped. Documents without blank lines produce few chunks, which the
/// fallback chain rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedLanguageStrategy;

impl ChunkingStrategy for MixedLanguageStrategy {
    fn chunk(&self, text: &str, ctx: &ChunkContext<'_>) -> Vec<String> {
        let mut chunks = Vec::new();

        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            let length = char_len(paragraph);

            if length < ctx.policy.min_paragraph_chars {
                if length > 0 {
                    tracing::debug!(length, "dropping short paragraph");
                }
                continue;
            }

            let profile = primary_profile(paragraph, ctx.registry, ctx.thresholds);

            if length > ctx.config.max_length() {
                let splitter = SentenceSplitter::for_profile(profile, ctx.thresholds);
                let decider =
                    ChunkBoundaryDecider::new(profile, ctx.config, ctx.policy, ctx.thresholds);
                chunks.extend(decider.chunk(splitter.split(paragraph)));
            } else if length > ctx.config.min_length() {
                chunks.push(collapse_whitespace(paragraph));
            } else {
                tracing::debug!(
                    length,
                    language = profile.code(),
                    "dropping paragraph below min_length"
                );
            }
        }

        chunks
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MixedLanguage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundaryPolicy, ChunkingConfig};
    use munch_core::{DetectionThresholds, LanguageRegistry};

    fn run(text: &str, config: ChunkingConfig) -> Vec<String> {
        let registry = LanguageRegistry::builtin();
        let policy = BoundaryPolicy::default();
        let thresholds = DetectionThresholds::default();
        let ctx = ChunkContext {
            registry,
            primary: registry.fallback(),
            config: &config,
            policy: &policy,
            thresholds: &thresholds,
        };
        MixedLanguageStrategy.chunk(text, &ctx)
    }

    const EN: &str = "Semantic search lets readers find passages by meaning rather than by exact words, which helps with long articles and reports.";
    const KO: &str = "의미 검색은 정확한 단어가 아니라 의미로 문단을 찾게 해 줍니다. 긴 기사와 보고서를 읽을 때 특히 유용합니다. 독자는 원하는 내용을 빠르게 찾을 수 있습니다. 이 기능은 여러 언어에서 동작합니다.";

    #[test]
    fn test_paragraphs_kept_whole() {
        let text = format!("{EN}\n\n{KO}\n\n{EN}");
        let chunks = run(&text, ChunkingConfig::default());
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], EN);
        assert_eq!(chunks[1], KO);
    }

    #[test]
    fn test_short_paragraphs_dropped() {
        let text = format!("Too short to keep.\n\n{EN}");
        let chunks = run(&text, ChunkingConfig::default());
        assert_eq!(chunks, vec![EN.to_string()]);
    }

    #[test]
    fn test_long_paragraph_rechunked_with_its_profile() {
        let config = ChunkingConfig::new(150, 200, 60).unwrap();
        let long_korean = format!("{KO} {KO}");
        assert!(long_korean.chars().count() > 200);

        let chunks = run(&long_korean, config);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 200);
            // Hangul profile glues sentences with a full-width stop
            assert!(chunk.ends_with('。'));
        }
    }

    #[test]
    fn test_no_blank_lines_gives_single_chunk() {
        let text = format!("{EN} {KO}");
        let chunks = run(&text, ChunkingConfig::default());
        assert_eq!(chunks.len(), 1);
    }
}

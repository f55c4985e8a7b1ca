//! Ordered fallback chain of strategies

use super::{
    ChunkContext, ChunkingStrategy, MixedLanguageStrategy, SingleLanguageStrategy, StrategyKind,
    UniversalStrategy,
};

/// Predicate deciding whether a strategy's output is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Any output, including none
    Any,
    /// At least one chunk
    NonEmpty,
    /// At least this many chunks
    AtLeast(usize),
}

impl Acceptance {
    pub fn accepts(&self, chunks: &[String]) -> bool {
        match self {
            Acceptance::Any => true,
            Acceptance::NonEmpty => !chunks.is_empty(),
            Acceptance::AtLeast(n) => chunks.len() >= *n,
        }
    }
}

/// One strategy and the predicate its output must satisfy
pub struct ChainStep {
    strategy: Box<dyn ChunkingStrategy>,
    acceptance: Acceptance,
}

impl ChainStep {
    pub fn new(strategy: impl ChunkingStrategy + 'static, acceptance: Acceptance) -> Self {
        Self {
            strategy: Box::new(strategy),
            acceptance,
        }
    }
}

impl std::fmt::Debug for ChainStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainStep")
            .field("strategy", &self.strategy.kind())
            .field("acceptance", &self.acceptance)
            .finish()
    }
}

/// Result of running a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Raw chunks of the accepted strategy
    pub chunks: Vec<String>,
    /// Strategy that produced them
    pub kind: StrategyKind,
    /// Whether an earlier strategy was rejected
    pub fallback_used: bool,
}

/// Strategies tried in order until one is accepted
#[derive(Debug, Default)]
pub struct StrategyChain {
    steps: Vec<ChainStep>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn then(mut self, strategy: impl ChunkingStrategy + 'static, acceptance: Acceptance) -> Self {
        self.steps.push(ChainStep::new(strategy, acceptance));
        self
    }

    /// Chain for documents dominated by one language
    pub fn single_language() -> Self {
        Self::new()
            .then(SingleLanguageStrategy, Acceptance::NonEmpty)
            .then(UniversalStrategy, Acceptance::Any)
    }

    /// Chain for mixed-language documents
    pub fn mixed_language(min_chunks: usize) -> Self {
        Self::new()
            .then(MixedLanguageStrategy, Acceptance::AtLeast(min_chunks))
            .then(UniversalStrategy, Acceptance::Any)
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Run strategies in order and keep the first accepted output
    ///
    /// When every step is rejected the last step's output is returned.
    pub fn run(&self, text: &str, ctx: &ChunkContext<'_>) -> Option<ChainOutcome> {
        let mut last = None;

        for (index, step) in self.steps.iter().enumerate() {
            let kind = step.strategy.kind();
            let chunks = step.strategy.chunk(text, ctx);
            let fallback_used = index > 0;

            if step.acceptance.accepts(&chunks) {
                tracing::debug!(
                    strategy = kind.name(),
                    chunks = chunks.len(),
                    fallback_used,
                    "strategy accepted"
                );
                return Some(ChainOutcome {
                    chunks,
                    kind,
                    fallback_used,
                });
            }

            tracing::debug!(
                strategy = kind.name(),
                chunks = chunks.len(),
                "strategy rejected, trying next"
            );
            last = Some(ChainOutcome {
                chunks,
                kind,
                fallback_used,
            });
        }

        if last.is_some() {
            tracing::warn!("every chunking strategy was rejected, keeping the last output");
        }
        last
    }
}

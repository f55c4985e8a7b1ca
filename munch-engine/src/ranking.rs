//! Similarity ranking of chunks against a query
//!
//! Embeddings are produced outside this crate (by the semantic-search
//! backend), indexed like the chunk list. This module only scores and
//! orders them.

use munch_core::char_len;
use serde::{Deserialize, Serialize};

/// Ranking parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingOptions {
    /// Maximum number of results
    pub top_k: usize,
    /// Minimum cosine similarity for a chunk to be returned
    pub similarity_threshold: f32,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.7,
        }
    }
}

/// A chunk scored against a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedChunk<'a> {
    /// Position in the chunk list
    pub index: usize,
    pub chunk: &'a str,
    pub similarity: f32,
    /// Chunk length in characters
    pub length: usize,
}

/// Cosine similarity of two vectors
///
/// Returns 0.0 for vectors of different length or with zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::debug!(left = a.len(), right = b.len(), "embedding length mismatch");
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score every chunk, keep those above the threshold, best first
///
/// `embeddings[i]` belongs to `chunks[i]`; surplus entries on either side
/// are ignored.
pub fn rank_chunks<'a>(
    chunks: &'a [String],
    query_embedding: &[f32],
    embeddings: &[Vec<f32>],
    options: RankingOptions,
) -> Vec<RankedChunk<'a>> {
    if chunks.len() != embeddings.len() {
        tracing::warn!(
            chunks = chunks.len(),
            embeddings = embeddings.len(),
            "chunk and embedding counts differ"
        );
    }

    let mut ranked: Vec<RankedChunk<'a>> = chunks
        .iter()
        .zip(embeddings)
        .enumerate()
        .map(|(index, (chunk, embedding))| RankedChunk {
            index,
            chunk: chunk.as_str(),
            similarity: cosine_similarity(query_embedding, embedding),
            length: char_len(chunk),
        })
        .filter(|r| r.similarity >= options.similarity_threshold)
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked.truncate(options.top_k);
    ranked
}

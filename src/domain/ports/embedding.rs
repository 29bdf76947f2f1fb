//! Embedding provider port.
//!
//! Converts text into a fixed-length dense vector for cosine-similarity
//! comparison. Implementations never fail the caller: on upstream trouble
//! (network, timeout, malformed response) they log the reason and return
//! the zero vector of their declared dimension, so one unavailable
//! dependency cannot abort the matching pipeline.

use async_trait::async_trait;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "huggingface", "offline").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Embed a single text. Degrades to the zero vector on failure.
    async fn embed(&self, text: &str) -> Vec<f32>;
}

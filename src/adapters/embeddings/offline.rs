//! Offline deterministic embedding provider.
//!
//! Generates hash-based unit-length vectors with no network dependency.
//! Same text always produces the same vector, and related texts do not
//! cluster meaningfully; this exists so the pipeline (including the
//! semantic stage and cache build) can run in development and tests, not
//! as a semantic model.

use async_trait::async_trait;

use crate::domain::ports::EmbeddingProvider;

/// Deterministic no-network embedding provider.
pub struct OfflineEmbedder {
    dimension: usize,
}

impl OfflineEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Generate a deterministic pseudo-random vector, L2-normalized.
    pub fn generate(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0; self.dimension];
        let text_bytes = text.as_bytes();

        for (i, val) in embedding.iter_mut().enumerate() {
            let byte_idx = i % text_bytes.len().max(1);
            let byte_val = if text_bytes.is_empty() { 0 } else { text_bytes[byte_idx] };
            *val = ((byte_val as usize * 31 + i * 17) % 256) as f32 / 255.0 - 0.5;
        }

        // f64 accumulation avoids magnitude drift across many dimensions
        let magnitude_f64: f64 =
            embedding.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt();
        let magnitude = magnitude_f64 as f32;

        if magnitude > 1e-10 {
            for val in &mut embedding {
                *val /= magnitude;
            }
        } else {
            let uniform_val = 1.0 / (self.dimension as f32).sqrt();
            for val in &mut embedding {
                *val = uniform_val;
            }
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for OfflineEmbedder {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Vec<f32> {
        self.generate(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embed_produces_declared_dimension() {
        let embedder = OfflineEmbedder::new(384);
        let embedding = embedder.embed("Hello world").await;
        assert_eq!(embedding.len(), 384);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let embedder = OfflineEmbedder::new(384);
        let first = embedder.embed("repeatable text").await;
        let second = embedder.embed("repeatable text").await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_length() {
        let embedder = OfflineEmbedder::new(384);
        let embedding = embedder.generate("test");
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_text_still_valid() {
        let embedder = OfflineEmbedder::new(384);
        let embedding = embedder.generate("");
        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|v| v.is_finite()));
    }
}

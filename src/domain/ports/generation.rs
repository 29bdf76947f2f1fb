//! Generative fallback port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Produces free-form recommendation text when no catalog entry matched
/// confidently. Adapters surface failures as errors; the pipeline's
/// generative stage turns an error into a literal error reply rather than
/// propagating it.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generator name (e.g., "openai").
    fn name(&self) -> &'static str;

    /// Generate a reply for the raw (unnormalized) query text.
    async fn generate(&self, query: &str) -> DomainResult<String>;
}

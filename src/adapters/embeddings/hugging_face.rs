//! HuggingFace feature-extraction embedding adapter.
//!
//! Calls an inference endpoint of the form `{base_url}/{model}` with a
//! `{"inputs": text}` body. Compatible with the hosted HuggingFace
//! inference API and any server exposing the same pipeline shape.
//!
//! Failures never reach the caller: every error path degrades to the zero
//! vector with a warning, so the matching pipeline keeps running when the
//! embedding service is down. No retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::EmbeddingProvider;

/// HuggingFace feature-extraction provider.
pub struct HuggingFaceEmbedder {
    config: EmbeddingConfig,
    client: Arc<reqwest::Client>,
}

impl HuggingFaceEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");
        Self { config, client: Arc::new(client) }
    }

    /// API token from config or environment; the hosted endpoint accepts
    /// anonymous calls at a reduced rate, so absence is not an error.
    fn api_token(&self) -> Option<String> {
        self.config.api_token.clone().or_else(|| std::env::var("HF_API_TOKEN").ok())
    }

    fn endpoint_url(&self) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), self.config.model)
    }

    async fn request_embedding(&self, text: &str) -> DomainResult<Vec<f32>> {
        let mut request = self
            .client
            .post(self.endpoint_url())
            .header("Content-Type", "application/json")
            .json(&FeatureExtractionRequest { inputs: text.to_string() });

        if let Some(token) = self.api_token() {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::UpstreamError(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::UpstreamError(format!(
                "embedding service returned {status}: {body}"
            )));
        }

        let parsed: FeatureExtractionResponse = response.json().await.map_err(|e| {
            DomainError::SerializationError(format!("failed to parse embedding response: {e}"))
        })?;

        let vector = parsed.into_vector().ok_or_else(|| {
            DomainError::UpstreamError("embedding response contained no vector".to_string())
        })?;

        if vector.len() != self.config.dimension {
            return Err(DomainError::UpstreamError(format!(
                "embedding has {} dimensions, expected {}",
                vector.len(),
                self.config.dimension
            )));
        }

        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceEmbedder {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> Vec<f32> {
        match self.request_embedding(text).await {
            Ok(vector) => vector,
            Err(error) => {
                warn!(provider = self.name(), %error, "embedding degraded to zero vector");
                vec![0.0; self.config.dimension]
            }
        }
    }
}

// -- wire types --

#[derive(Debug, Serialize)]
struct FeatureExtractionRequest {
    inputs: String,
}

/// Sentence-transformer pipelines return either a flat vector or a
/// single-row nested array depending on the deployment; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

impl FeatureExtractionResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        match self {
            Self::Flat(vector) => Some(vector),
            Self::Nested(rows) => rows.into_iter().next(),
        }
    }
}

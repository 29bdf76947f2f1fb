//! OpenAI-compatible chat-completion adapter for the generative fallback.
//!
//! Calls `{base_url}/chat/completions` with a fixed system instruction and
//! the raw user query. Compatible with any OpenAI-compatible server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::ReplyGenerator;

/// System instruction sent with every fallback request.
const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that recommends Telegram bots based on user queries.";

/// OpenAI-compatible chat-completion generator.
pub struct OpenAiGenerator {
    config: GenerationConfig,
    client: Arc<reqwest::Client>,
}

impl OpenAiGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");
        Self { config, client: Arc::new(client) }
    }

    fn get_api_key(&self) -> DomainResult<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                DomainError::ConfigurationError(
                    "Generation API key not set. Set OPENAI_API_KEY env var or configure api_key."
                        .to_string(),
                )
            })
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiGenerator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, query: &str) -> DomainResult<String> {
        let api_key = self.get_api_key()?;
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_INSTRUCTION.to_string() },
                ChatMessage { role: "user".to_string(), content: query.to_string() },
            ],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamError(format!("generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::UpstreamError(format!(
                "generation service returned {status}: {body}"
            )));
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            DomainError::SerializationError(format!("failed to parse generation response: {e}"))
        })?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::UpstreamError("generation response had no choices".to_string()))
    }
}

// -- wire types --

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_config() {
        let generator = OpenAiGenerator::new(GenerationConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        });
        assert_eq!(generator.get_api_key().unwrap(), "test-key");
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Try WeatherBot."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Try WeatherBot.");
    }

    #[test]
    fn test_system_instruction_mentions_telegram_bots() {
        assert!(SYSTEM_INSTRUCTION.contains("helpful assistant that recommends Telegram bots"));
    }
}

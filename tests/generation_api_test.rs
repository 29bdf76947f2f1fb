//! HTTP-level tests for the OpenAI-compatible generation adapter.
//!
//! Unlike the embedding adapter, `generate` is fallible; callers decide
//! how a failure turns into a reply.

use botmatch::adapters::generation::OpenAiGenerator;
use botmatch::domain::models::GenerationConfig;
use botmatch::domain::ports::ReplyGenerator;
use mockito::Server;

fn config_for(server: &Server) -> GenerationConfig {
    GenerationConfig {
        base_url: server.url(),
        model: "test-model".to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        max_tokens: 64,
    }
}

fn success_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_generation_returns_first_choice() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body("Try @WeatherBot for forecasts."))
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    let reply = generator.generate("weather in tokyo").await.unwrap();

    assert_eq!(reply, "Try @WeatherBot for forecasts.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_body_carries_model_and_limits() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "test-model",
            "max_tokens": 64
        })))
        .with_status(200)
        .with_body(success_body("ok"))
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    generator.generate("weather in tokyo").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_raw_query_is_forwarded_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "messages": [
                {"role": "system", "content": "You are a helpful assistant that recommends Telegram bots based on user queries."},
                {"role": "user", "content": "  Weather In TOKYO  "}
            ]
        })))
        .with_status(200)
        .with_body(success_body("ok"))
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    // The fallback receives raw text; nothing lowercases or trims it.
    generator.generate("  Weather In TOKYO  ").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_surfaces_as_upstream_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body(r#"{"error": {"message": "internal"}}"#)
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    let err = generator.generate("weather").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"), "error should carry the status: {message}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"id": "chatcmpl-123", "choices": []}"#)
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    let err = generator.generate("weather").await.unwrap_err();

    assert!(err.to_string().contains("no choices"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    let err = generator.generate("weather").await.unwrap_err();

    assert!(err.to_string().contains("parse"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_key_takes_precedence() {
    // The config key must be used even if the environment also has one;
    // the header assertion above pins the exact value sent.
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(success_body("ok"))
        .create_async()
        .await;

    let generator = OpenAiGenerator::new(config_for(&server));
    assert!(generator.generate("weather").await.is_ok());
    mock.assert_async().await;
}

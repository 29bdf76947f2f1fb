//! Common test utilities for integration tests
//!
//! Provides shared fixtures and stub adapters used across multiple
//! integration test files.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use botmatch::adapters::store::{create_test_pool, SqliteKvStore};
use botmatch::domain::errors::{DomainError, DomainResult};
use botmatch::domain::models::{BotEntry, MatchingConfig};
use botmatch::domain::ports::{EmbeddingProvider, ReplyGenerator};
use botmatch::services::{EmbeddingCache, MatchEngine, QueryHandler};

/// Fresh in-memory store with the schema applied.
#[allow(dead_code)]
pub async fn setup_store() -> SqliteKvStore {
    let pool = create_test_pool().await.expect("failed to create test pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("failed to run migrations");
    SqliteKvStore::new(pool)
}

/// Three-entry catalog used across pipeline tests.
#[allow(dead_code)]
pub fn sample_entries() -> Vec<BotEntry> {
    vec![
        BotEntry::new("WeatherBot", "weather", "weather updates", "t.me/weatherbot"),
        BotEntry::new("NewsBot", "news", "breaking headlines", "t.me/newsbot"),
        BotEntry::new("CryptoBot", "finance", "coin prices", "t.me/cryptobot"),
    ]
}

/// Embedder returning preset vectors by exact text, zero otherwise.
#[allow(dead_code)]
pub struct PresetEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

#[allow(dead_code)]
impl PresetEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { vectors: HashMap::new(), dimension }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }
}

#[async_trait]
impl EmbeddingProvider for PresetEmbedder {
    fn name(&self) -> &'static str {
        "preset"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Vec<f32> {
        self.vectors.get(text).cloned().unwrap_or_else(|| vec![0.0; self.dimension])
    }
}

/// Generator with a canned reply or a canned failure.
#[allow(dead_code)]
pub struct CannedGenerator {
    reply: String,
    fail: bool,
}

#[allow(dead_code)]
impl CannedGenerator {
    pub fn success(reply: &str) -> Self {
        Self { reply: reply.to_string(), fail: false }
    }

    pub fn failure() -> Self {
        Self { reply: String::new(), fail: true }
    }
}

#[async_trait]
impl ReplyGenerator for CannedGenerator {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(&self, _query: &str) -> DomainResult<String> {
        if self.fail {
            Err(DomainError::UpstreamError("service unavailable".to_string()))
        } else {
            Ok(self.reply.clone())
        }
    }
}

/// Wire a full query handler over one store with the given adapters.
#[allow(dead_code)]
pub fn handler_for(
    store: &SqliteKvStore,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn ReplyGenerator>,
    config: MatchingConfig,
) -> QueryHandler {
    let cache = EmbeddingCache::new(Arc::new(store.clone()), embedder.clone());
    let engine = MatchEngine::new(embedder, generator, config.clone());
    QueryHandler::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        cache,
        engine,
        config.history_limit,
    )
}

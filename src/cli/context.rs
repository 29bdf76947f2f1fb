//! Shared service wiring for CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::embeddings::{HuggingFaceEmbedder, OfflineEmbedder};
use crate::adapters::generation::OpenAiGenerator;
use crate::adapters::store::{create_pool, verify_connection, PoolConfig, SqliteKvStore};
use crate::domain::models::Config;
use crate::domain::ports::{EmbeddingProvider, ReplyGenerator};
use crate::services::{EmbeddingCache, MatchEngine, QueryHandler};

/// Everything a command needs, wired from one loaded config.
pub struct AppContext {
    pub config: Config,
    pub store: SqliteKvStore,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub handler: QueryHandler,
}

impl AppContext {
    /// Build the full service stack against the configured database.
    pub async fn build(config: Config) -> Result<Self> {
        let database_url = format!("sqlite://{}", config.store.path);
        let pool_config = PoolConfig {
            max_connections: config.store.max_connections,
            ..Default::default()
        };

        let pool = create_pool(&database_url, Some(pool_config))
            .await
            .context("Failed to open database")?;
        verify_connection(&pool)
            .await
            .context("Database connection check failed")?;

        // Idempotent; a database created outside `init` gets its schema here.
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        let store = SqliteKvStore::new(pool);

        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding.provider.as_str() {
            "offline" => Arc::new(OfflineEmbedder::new(config.embedding.dimension)),
            _ => Arc::new(HuggingFaceEmbedder::new(config.embedding.clone())),
        };
        let generator: Arc<dyn ReplyGenerator> =
            Arc::new(OpenAiGenerator::new(config.generation.clone()));

        let cache = EmbeddingCache::new(Arc::new(store.clone()), embedder.clone());
        let engine = MatchEngine::new(embedder.clone(), generator, config.matching.clone());
        let handler = QueryHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            cache,
            engine,
            config.matching.history_limit,
        );

        Ok(Self {
            config,
            store,
            embedder,
            handler,
        })
    }
}

//! Botmatch - layered bot recommendation engine
//!
//! Botmatch matches free-text user queries against a catalog of bots using a
//! layered pipeline: keyword substring search, category listing via `/filter`
//! markers, semantic similarity over embeddings, and finally a generative
//! fallback when nothing in the catalog fits. Per-user search history and the
//! embedding cache persist in a SQLite-backed key-value store.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): Matching pipeline and query orchestration
//! - **Adapters Layer** (`adapters`): Embedding, generation, and storage backends
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, setup
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use botmatch::cli::AppContext;
//! use botmatch::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let context = AppContext::build(config).await?;
//!     let result = context.handler.handle("cli", "weather in tokyo").await;
//!     println!("{}", result.reply);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BotEntry, Catalog, Config, EmbeddingConfig, GenerationConfig, HistoryEntry, LoggingConfig,
    MatchKind, MatchResult, MatchingConfig, SearchHistory, SearchQuery, StoreConfig,
};
pub use domain::ports::{
    CatalogStore, EmbeddingCacheStore, EmbeddingProvider, HistoryStore, ReplyGenerator,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{EmbeddingCache, MatchEngine, QueryHandler};

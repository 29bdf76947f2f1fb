//! Service layer: orchestration built on domain ports.

pub mod embedding_cache;
pub mod match_engine;
pub mod query_handler;

pub use embedding_cache::EmbeddingCache;
pub use match_engine::{cosine_similarity, MatchEngine};
pub use query_handler::QueryHandler;

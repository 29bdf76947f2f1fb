//! Port trait definitions (hexagonal architecture).
//!
//! Async trait interfaces that adapters implement:
//! - `EmbeddingProvider`: text to fixed-length vector
//! - `ReplyGenerator`: generative fallback text
//! - `CatalogStore` / `EmbeddingCacheStore` / `HistoryStore`: the external
//!   key-value collaborators
//!
//! These contracts keep the matching pipeline independent of any concrete
//! service or storage backend.

pub mod embedding;
pub mod generation;
pub mod store;

pub use embedding::EmbeddingProvider;
pub use generation::ReplyGenerator;
pub use store::{CatalogStore, EmbeddingCacheStore, HistoryStore};

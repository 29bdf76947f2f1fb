//! Store ports for the external key-value collaborators.
//!
//! The catalog, the embedding cache, and per-user search history all live
//! in an external store. These ports report failures as errors; deciding
//! whether a failure degrades to an empty value is a service concern, not
//! a store concern.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{BotEntry, Catalog, SearchHistory};

/// Read access to the bot catalog, plus full replacement for seeding.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load and normalize the catalog snapshot. A missing key is an empty
    /// catalog, not an error.
    async fn load(&self) -> DomainResult<Catalog>;

    /// Replace the whole catalog (admin/seed path, not the request path).
    async fn replace(&self, entries: &[BotEntry]) -> DomainResult<()>;
}

/// Persisted embedding vectors keyed by catalog snapshot index.
#[async_trait]
pub trait EmbeddingCacheStore: Send + Sync {
    /// Load the cached mapping. A missing key is an empty mapping. Indices
    /// are strings on the wire; unparseable keys are skipped.
    async fn load(&self) -> DomainResult<BTreeMap<usize, Vec<f32>>>;

    /// Replace the whole mapping.
    async fn replace(&self, mapping: &BTreeMap<usize, Vec<f32>>) -> DomainResult<()>;
}

/// Per-user bounded search history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load one user's history. A missing key is an empty history.
    async fn load(&self, user_id: &str) -> DomainResult<SearchHistory>;

    /// Persist one user's history.
    async fn save(&self, user_id: &str, history: &SearchHistory) -> DomainResult<()>;
}

//! Query orchestration: history, catalog snapshot, pipeline, fault boundary.
//!
//! `handle` never returns an error. Anything that escapes the inner flow is
//! logged and collapsed into a generic failure reply so the transport always
//! has something to send back.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::models::{Catalog, MatchResult, SearchHistory, SearchQuery};
use crate::domain::ports::{CatalogStore, HistoryStore};
use crate::domain::DomainResult;

use super::embedding_cache::EmbeddingCache;
use super::match_engine::MatchEngine;

pub struct QueryHandler {
    catalog_store: Arc<dyn CatalogStore>,
    history_store: Arc<dyn HistoryStore>,
    cache: EmbeddingCache,
    engine: MatchEngine,
    history_limit: usize,
}

impl QueryHandler {
    pub fn new(
        catalog_store: Arc<dyn CatalogStore>,
        history_store: Arc<dyn HistoryStore>,
        cache: EmbeddingCache,
        engine: MatchEngine,
        history_limit: usize,
    ) -> Self {
        Self { catalog_store, history_store, cache, engine, history_limit }
    }

    /// Resolve one query for one user.
    pub async fn handle(&self, user_id: &str, raw_query: &str) -> MatchResult {
        let query = SearchQuery::new(raw_query);

        match self.try_handle(user_id, &query).await {
            Ok(result) => {
                info!(
                    user = user_id,
                    kind = result.kind.as_str(),
                    similarity = ?result.similarity,
                    "query resolved"
                );
                result
            }
            Err(err) => {
                error!(user = user_id, %err, "query handling failed");
                MatchResult::failure(&err.to_string())
            }
        }
    }

    async fn try_handle(&self, user_id: &str, query: &SearchQuery) -> DomainResult<MatchResult> {
        self.record_history(user_id, query).await?;

        let catalog = self.load_catalog().await;
        let cached = self.cache.get_or_build(&catalog).await;

        Ok(self.engine.resolve(query, &catalog, &cached).await)
    }

    /// Record the normalized query, capped at the configured limit.
    /// Queries that normalize to nothing are not worth remembering.
    async fn record_history(&self, user_id: &str, query: &SearchQuery) -> DomainResult<()> {
        if query.is_empty() {
            return Ok(());
        }

        let mut history = self.history_store.load(user_id).await?;
        history.push(query.normalized(), self.history_limit);
        self.history_store.save(user_id, &history).await
    }

    /// A catalog that cannot be read behaves like one that was never seeded.
    async fn load_catalog(&self) -> Catalog {
        match self.catalog_store.load().await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(%err, "catalog load failed, treating as empty");
                Catalog::default()
            }
        }
    }

    /// Recent queries for one user, oldest first.
    pub async fn history(&self, user_id: &str) -> DomainResult<SearchHistory> {
        self.history_store.load(user_id).await
    }
}

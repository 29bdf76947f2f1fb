//! In-memory implementation of the key-value store ports.
//!
//! Backs tests and ephemeral runs with the same key layout as the SQLite
//! adapter, so the two are interchangeable behind the store ports.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::models::{BotEntry, Catalog, SearchHistory};
use crate::domain::ports::{CatalogStore, EmbeddingCacheStore, HistoryStore};

use super::sqlite::{CATALOG_KEY, EMBEDDING_CACHE_KEY, HISTORY_KEY_PREFIX};

/// In-memory key-value store.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an arbitrary key with a raw JSON document (test setup).
    pub async fn set_raw(&self, key: impl Into<String>, value: Value) {
        let mut values = self.values.write().await;
        values.insert(key.into(), value);
    }

    async fn read_value(&self, key: &str) -> Option<Value> {
        let values = self.values.read().await;
        values.get(key).cloned()
    }

    async fn write_value(&self, key: &str, value: Value) {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value);
    }
}

#[async_trait]
impl CatalogStore for MemoryKvStore {
    async fn load(&self) -> DomainResult<Catalog> {
        Ok(self.read_value(CATALOG_KEY).await.map(Catalog::from_value).unwrap_or_default())
    }

    async fn replace(&self, entries: &[BotEntry]) -> DomainResult<()> {
        self.write_value(CATALOG_KEY, serde_json::to_value(entries)?).await;
        Ok(())
    }
}

#[async_trait]
impl EmbeddingCacheStore for MemoryKvStore {
    async fn load(&self) -> DomainResult<BTreeMap<usize, Vec<f32>>> {
        let Some(value) = self.read_value(EMBEDDING_CACHE_KEY).await else {
            return Ok(BTreeMap::new());
        };

        let raw: BTreeMap<String, Vec<f32>> = serde_json::from_value(value)?;
        let mut mapping = BTreeMap::new();
        for (key, vector) in raw {
            match key.parse::<usize>() {
                Ok(index) => {
                    mapping.insert(index, vector);
                }
                Err(_) => warn!(key = %key, "skipping embedding cache entry with non-numeric index"),
            }
        }
        Ok(mapping)
    }

    async fn replace(&self, mapping: &BTreeMap<usize, Vec<f32>>) -> DomainResult<()> {
        let raw: BTreeMap<String, &Vec<f32>> =
            mapping.iter().map(|(index, vector)| (index.to_string(), vector)).collect();
        self.write_value(EMBEDDING_CACHE_KEY, serde_json::to_value(&raw)?).await;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryKvStore {
    async fn load(&self, user_id: &str) -> DomainResult<SearchHistory> {
        let key = format!("{HISTORY_KEY_PREFIX}{user_id}");
        match self.read_value(&key).await {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(SearchHistory::new()),
        }
    }

    async fn save(&self, user_id: &str, history: &SearchHistory) -> DomainResult<()> {
        let key = format!("{HISTORY_KEY_PREFIX}{user_id}");
        self.write_value(&key, serde_json::to_value(history)?).await;
        Ok(())
    }
}

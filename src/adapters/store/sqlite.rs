//! SQLite implementation of the key-value store ports.
//!
//! One `kv` table holds JSON documents: the catalog under `bots`, the
//! embedding cache under `bot_embeddings`, and per-user history under
//! `history:<user>`. All three store ports are implemented by the same
//! adapter over one connection pool.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::models::{BotEntry, Catalog, SearchHistory};
use crate::domain::ports::{CatalogStore, EmbeddingCacheStore, HistoryStore};

/// Store key holding the catalog document.
pub const CATALOG_KEY: &str = "bots";
/// Store key holding the embedding cache document.
pub const EMBEDDING_CACHE_KEY: &str = "bot_embeddings";
/// Prefix for per-user history keys.
pub const HISTORY_KEY_PREFIX: &str = "history:";

#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn read_value(&self, key: &str) -> DomainResult<Option<Value>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((text,)) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn write_value(&self, key: &str, value: &Value) -> DomainResult<()> {
        let text = serde_json::to_string(value)?;
        sqlx::query(
            r#"INSERT INTO kv (key, value, updated_at) VALUES (?, ?, datetime('now'))
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for SqliteKvStore {
    async fn load(&self) -> DomainResult<Catalog> {
        let value = self.read_value(CATALOG_KEY).await?;
        Ok(value.map(Catalog::from_value).unwrap_or_default())
    }

    async fn replace(&self, entries: &[BotEntry]) -> DomainResult<()> {
        let value = serde_json::to_value(entries)?;
        self.write_value(CATALOG_KEY, &value).await
    }
}

#[async_trait]
impl EmbeddingCacheStore for SqliteKvStore {
    async fn load(&self) -> DomainResult<BTreeMap<usize, Vec<f32>>> {
        let Some(value) = self.read_value(EMBEDDING_CACHE_KEY).await? else {
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
        let value = serde_json::to_value(&raw)?;
        self.write_value(EMBEDDING_CACHE_KEY, &value).await
    }
}

#[async_trait]
impl HistoryStore for SqliteKvStore {
    async fn load(&self, user_id: &str) -> DomainResult<SearchHistory> {
        let key = format!("{HISTORY_KEY_PREFIX}{user_id}");
        match self.read_value(&key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(SearchHistory::new()),
        }
    }

    async fn save(&self, user_id: &str, history: &SearchHistory) -> DomainResult<()> {
        let key = format!("{HISTORY_KEY_PREFIX}{user_id}");
        let value = serde_json::to_value(history)?;
        self.write_value(&key, &value).await
    }
}

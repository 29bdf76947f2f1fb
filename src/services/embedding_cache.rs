//! Embedding cache service.
//!
//! One persisted vector per catalog entry, keyed by snapshot index. A
//! non-empty persisted mapping is trusted as-is without validating it
//! against the current catalog; staleness is tolerated downstream, where
//! lookup falls back to computing a missing or misaligned entry on
//! demand. Only an empty cache triggers a full build.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::models::Catalog;
use crate::domain::ports::{EmbeddingCacheStore, EmbeddingProvider};

pub struct EmbeddingCache {
    store: Arc<dyn EmbeddingCacheStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    build_guard: Mutex<()>,
}

impl EmbeddingCache {
    pub fn new(store: Arc<dyn EmbeddingCacheStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder, build_guard: Mutex::new(()) }
    }

    /// Return the persisted mapping, building and persisting it first when
    /// it is empty.
    ///
    /// The build step holds an in-process mutex and re-checks the store
    /// after acquiring it, so concurrent requests in one process produce a
    /// single build. Across processes the store write remains
    /// last-writer-wins. A persist failure is logged and the in-memory
    /// mapping is used for the current request.
    pub async fn get_or_build(&self, catalog: &Catalog) -> BTreeMap<usize, Vec<f32>> {
        let cached = self.load_or_empty().await;
        if !cached.is_empty() || catalog.is_empty() {
            return cached;
        }

        let _guard = self.build_guard.lock().await;
        let cached = self.load_or_empty().await;
        if !cached.is_empty() {
            return cached;
        }

        let built = self.build(catalog).await;
        if let Err(error) = self.store.replace(&built).await {
            warn!(%error, "failed to persist embedding cache, using in-memory copy");
        }
        built
    }

    async fn load_or_empty(&self) -> BTreeMap<usize, Vec<f32>> {
        match self.store.load().await {
            Ok(mapping) => mapping,
            Err(error) => {
                warn!(%error, "embedding cache load failed, treating as empty");
                BTreeMap::new()
            }
        }
    }

    async fn build(&self, catalog: &Catalog) -> BTreeMap<usize, Vec<f32>> {
        info!(
            entries = catalog.len(),
            provider = self.embedder.name(),
            "building embedding cache"
        );
        let mut mapping = BTreeMap::new();
        for (index, entry) in catalog.iter().enumerate() {
            let vector = self.embedder.embed(&entry.description).await;
            mapping.insert(index, vector);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embeddings::OfflineEmbedder;
    use crate::adapters::store::MemoryKvStore;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::models::BotEntry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FailingCacheStore;

    #[async_trait]
    impl EmbeddingCacheStore for FailingCacheStore {
        async fn load(&self) -> DomainResult<BTreeMap<usize, Vec<f32>>> {
            Err(DomainError::StorageError("store offline".to_string()))
        }

        async fn replace(&self, _mapping: &BTreeMap<usize, Vec<f32>>) -> DomainResult<()> {
            Err(DomainError::StorageError("store offline".to_string()))
        }
    }

    /// Counts `embed` calls; slow enough that overlapping builds overlap.
    struct CountingEmbedder {
        inner: OfflineEmbedder,
        calls: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new(dimension: usize) -> Self {
            Self { inner: OfflineEmbedder::new(dimension), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn dimension(&self) -> usize {
            self.inner.dimension()
        }

        async fn embed(&self, text: &str) -> Vec<f32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.inner.generate(text)
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            BotEntry::new("WeatherBot", "weather", "weather updates", "t.me/weatherbot"),
            BotEntry::new("NewsBot", "news", "breaking headlines", "t.me/newsbot"),
        ])
    }

    #[tokio::test]
    async fn test_build_covers_every_entry_and_persists() {
        let store = Arc::new(MemoryKvStore::new());
        let embedder = Arc::new(OfflineEmbedder::new(16));
        let cache = EmbeddingCache::new(store.clone(), embedder.clone());

        let catalog = sample_catalog();
        let mapping = cache.get_or_build(&catalog).await;

        assert_eq!(mapping.len(), catalog.len());
        assert_eq!(mapping.get(&0).unwrap(), &embedder.generate("weather updates"));

        // Persisted mapping is bit-for-bit what the provider produced.
        let persisted = EmbeddingCacheStore::load(store.as_ref()).await.unwrap();
        assert_eq!(persisted, mapping);
    }

    #[tokio::test]
    async fn test_non_empty_cache_is_trusted_as_is() {
        let store = Arc::new(MemoryKvStore::new());
        let mut stale = BTreeMap::new();
        stale.insert(0usize, vec![9.0f32, 9.0]);
        EmbeddingCacheStore::replace(store.as_ref(), &stale).await.unwrap();

        let cache = EmbeddingCache::new(store, Arc::new(OfflineEmbedder::new(16)));
        let mapping = cache.get_or_build(&sample_catalog()).await;

        // Smaller than the catalog and the wrong dimension, returned anyway.
        assert_eq!(mapping, stale);
    }

    #[tokio::test]
    async fn test_empty_catalog_builds_nothing() {
        let store = Arc::new(MemoryKvStore::new());
        let cache = EmbeddingCache::new(store.clone(), Arc::new(OfflineEmbedder::new(16)));

        let mapping = cache.get_or_build(&Catalog::default()).await;

        assert!(mapping.is_empty());
        assert!(EmbeddingCacheStore::load(store.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_in_memory_build() {
        let cache =
            EmbeddingCache::new(Arc::new(FailingCacheStore), Arc::new(OfflineEmbedder::new(16)));

        let catalog = sample_catalog();
        let mapping = cache.get_or_build(&catalog).await;

        // Load failed (treated as empty), build ran, persist failed, and
        // the request still got a full in-memory mapping.
        assert_eq!(mapping.len(), catalog.len());
    }

    #[tokio::test]
    async fn test_concurrent_requests_build_once() {
        let store = Arc::new(MemoryKvStore::new());
        let embedder = Arc::new(CountingEmbedder::new(16));
        let cache = Arc::new(EmbeddingCache::new(store, embedder.clone()));
        let catalog = sample_catalog();

        let first = {
            let cache = cache.clone();
            let catalog = catalog.clone();
            tokio::spawn(async move { cache.get_or_build(&catalog).await })
        };
        let second = {
            let cache = cache.clone();
            let catalog = catalog.clone();
            tokio::spawn(async move { cache.get_or_build(&catalog).await })
        };

        let (a, b) = (first.await.unwrap(), second.await.unwrap());
        assert_eq!(a, b);
        assert_eq!(a.len(), catalog.len());
        // The loser of the mutex race re-checks the store instead of
        // re-embedding, so the catalog is embedded exactly once.
        assert_eq!(embedder.calls.load(Ordering::SeqCst), catalog.len());
    }
}

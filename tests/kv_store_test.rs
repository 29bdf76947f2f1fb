//! File-backed store tests: pool creation, schema, and durability.

mod common;

use std::collections::BTreeMap;

use botmatch::adapters::store::{create_pool, verify_connection, PoolConfig, SqliteKvStore};
use botmatch::domain::models::SearchHistory;
use botmatch::domain::ports::{CatalogStore, EmbeddingCacheStore, HistoryStore};

use common::sample_entries;

#[tokio::test]
async fn test_data_survives_pool_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("botmatch.db").display());

    {
        let pool = create_pool(&database_url, None).await.expect("failed to create pool");
        sqlx::migrate!("./migrations").run(&pool).await.expect("failed to run migrations");

        let store = SqliteKvStore::new(pool.clone());
        CatalogStore::replace(&store, &sample_entries()).await.unwrap();
        pool.close().await;
    }

    let pool = create_pool(&database_url, None).await.expect("failed to reopen pool");
    let store = SqliteKvStore::new(pool.clone());

    let catalog = CatalogStore::load(&store).await.unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(0).unwrap().name, "WeatherBot");
    pool.close().await;
}

#[tokio::test]
async fn test_nested_database_directory_is_created() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("nested").join("deeper").join("botmatch.db");
    let database_url = format!("sqlite://{}", db_path.display());

    let pool = create_pool(&database_url, None).await.expect("failed to create pool");
    verify_connection(&pool).await.expect("connection should verify");

    assert!(db_path.exists(), "database file should exist at {}", db_path.display());
    pool.close().await;
}

#[tokio::test]
async fn test_wal_journal_mode_is_enabled() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("botmatch.db").display());

    let pool = create_pool(&database_url, Some(PoolConfig::default()))
        .await
        .expect("failed to create pool");

    let mode: String =
        sqlx::query_scalar("PRAGMA journal_mode").fetch_one(&pool).await.expect("pragma failed");
    assert_eq!(mode.to_lowercase(), "wal");
    pool.close().await;
}

#[tokio::test]
async fn test_all_documents_coexist_in_one_table() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("botmatch.db").display());

    let pool = create_pool(&database_url, None).await.expect("failed to create pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("failed to run migrations");
    let store = SqliteKvStore::new(pool.clone());

    CatalogStore::replace(&store, &sample_entries()).await.unwrap();

    let mut mapping = BTreeMap::new();
    mapping.insert(0usize, vec![0.25f32, -0.5]);
    EmbeddingCacheStore::replace(&store, &mapping).await.unwrap();

    let mut history = SearchHistory::new();
    history.push("weather", 5);
    HistoryStore::save(&store, "alice", &history).await.unwrap();

    assert_eq!(CatalogStore::load(&store).await.unwrap().len(), 3);
    assert_eq!(EmbeddingCacheStore::load(&store).await.unwrap(), mapping);
    assert_eq!(HistoryStore::load(&store, "alice").await.unwrap().len(), 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(count, 3);
    pool.close().await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("botmatch.db").display());

    let pool = create_pool(&database_url, None).await.expect("failed to create pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("first run failed");
    sqlx::migrate!("./migrations").run(&pool).await.expect("second run failed");

    let store = SqliteKvStore::new(pool.clone());
    assert!(CatalogStore::load(&store).await.unwrap().is_empty());
    pool.close().await;
}

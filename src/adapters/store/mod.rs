//! Key-value store adapters.

pub mod connection;
pub mod memory;
pub mod sqlite;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

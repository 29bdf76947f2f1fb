//! Adapters for external systems.

pub mod embeddings;
pub mod generation;
pub mod store;

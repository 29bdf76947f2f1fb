//! Infrastructure layer module
//!
//! Cross-cutting concerns that sit outside the domain: configuration
//! loading, logging setup, and project initialization.

pub mod config;
pub mod logging;
pub mod setup;

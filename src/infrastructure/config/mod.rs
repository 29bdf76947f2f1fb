//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment: programmatic defaults, then
//! project YAML files, then BOTMATCH_* environment variables.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid embedding provider: {0}. Must be one of: huggingface, offline")]
    InvalidProvider(String),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid similarity_threshold: {0}. Must be within [-1.0, 1.0]")]
    InvalidThreshold(f32),

    #[error("Invalid history_limit: {0}. Must be at least 1")]
    InvalidHistoryLimit(usize),

    #[error("Store path cannot be empty")]
    EmptyStorePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .botmatch/config.yaml (project config, created by init)
    /// 3. .botmatch/local.yaml (project local overrides, optional)
    /// 4. Environment variables (BOTMATCH_* prefix, highest priority)
    ///
    /// Configuration is project-local (pwd/.botmatch/) so several catalogs
    /// can live side by side on one machine.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".botmatch/config.yaml"))
            .merge(Yaml::file(".botmatch/local.yaml"))
            .merge(Env::prefixed("BOTMATCH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate embedding config
        let valid_providers = ["huggingface", "offline"];
        if !valid_providers.contains(&config.embedding.provider.as_str()) {
            return Err(ConfigError::InvalidProvider(
                config.embedding.provider.clone(),
            ));
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }

        if config.embedding.base_url.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "embedding base_url cannot be empty".to_string(),
            ));
        }

        if config.embedding.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "embedding model cannot be empty".to_string(),
            ));
        }

        if config.embedding.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "embedding timeout_secs cannot be 0".to_string(),
            ));
        }

        // Validate generation config
        if config.generation.base_url.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "generation base_url cannot be empty".to_string(),
            ));
        }

        if config.generation.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "generation model cannot be empty".to_string(),
            ));
        }

        if config.generation.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "generation timeout_secs cannot be 0".to_string(),
            ));
        }

        if config.generation.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "generation max_tokens cannot be 0".to_string(),
            ));
        }

        // Validate store config
        if config.store.path.is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }

        if config.store.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.store.max_connections,
            ));
        }

        // Validate matching config
        if !(-1.0..=1.0).contains(&config.matching.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold(
                config.matching.similarity_threshold,
            ));
        }

        if config.matching.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit(
                config.matching.history_limit,
            ));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

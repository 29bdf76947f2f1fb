//! Project setup and initialization infrastructure
//!
//! Handles `botmatch init`: configuration directory creation, default
//! config file creation, and database migrations.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Botmatch Configuration
# Override settings by editing this file or setting environment variables
# with BOTMATCH_ prefix
#
# Example environment variables:
#   export BOTMATCH_MATCHING__SIMILARITY_THRESHOLD=0.45
#   export BOTMATCH_EMBEDDING__PROVIDER=offline
#   export BOTMATCH_STORE__PATH=/custom/path/botmatch.db
#   export BOTMATCH_LOGGING__LEVEL=debug

# Embedding provider for the semantic matching stage
embedding:
  # Provider backend: huggingface, offline
  provider: "huggingface"

  # Feature-extraction endpoint
  base_url: "https://api-inference.huggingface.co/pipeline/feature-extraction"

  # Model identifier appended to the base URL
  model: "sentence-transformers/all-MiniLM-L6-v2"

  # Vector dimensionality produced by the model
  dimension: 384

  # Request timeout in seconds
  timeout_secs: 10

# Generative fallback for queries no stage could match
generation:
  # Chat-completion endpoint
  base_url: "https://api.openai.com/v1"

  # Model to use
  model: "gpt-3.5-turbo"

  # Request timeout in seconds
  timeout_secs: 20

  # Maximum tokens in the generated reply
  max_tokens: 256

# Key-value store configuration
store:
  # Path to SQLite database file (project-local)
  path: ".botmatch/botmatch.db"

  # Maximum number of database connections in pool
  max_connections: 5

# Matching pipeline configuration
matching:
  # Minimum cosine similarity for a semantic match (strict inequality)
  similarity_threshold: 0.30

  # Whether a /filter query replaces an earlier keyword hit
  category_overrides_keyword: true

  # Queries retained per user in search history
  history_limit: 5

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "info"

  # Log format: json, pretty
  format: "pretty"
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub database_file: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_dir = current_dir.join(".botmatch");

        Ok(Self {
            config_file: config_dir.join("config.yaml"),
            database_file: config_dir.join("botmatch.db"),
            config_dir,
        })
    }

    /// Check if botmatch is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists() && self.database_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths, force: bool) -> Result<()> {
    if paths.config_dir.exists() && !force {
        return Ok(());
    }

    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")?;

    Ok(())
}

/// Create the default configuration file
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<()> {
    if paths.config_file.exists() && !force {
        return Ok(());
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE)
        .context("Failed to write config file")?;

    Ok(())
}

/// Run database migrations
pub async fn run_migrations(paths: &SetupPaths, force: bool) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = paths.database_file.parent() {
        fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", paths.database_file.display());

    let db_exists = paths.database_file.exists();

    if db_exists && !force {
        return Ok(());
    }

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses_and_validates() {
        let config: crate::domain::models::Config =
            serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("Template should parse");

        crate::infrastructure::config::ConfigLoader::validate(&config)
            .expect("Template should match a valid default config");
        assert_eq!(config.store.path, ".botmatch/botmatch.db");
        assert!((config.matching.similarity_threshold - 0.30).abs() < f32::EPSILON);
    }
}

use serde::{Deserialize, Serialize};

/// Main configuration structure for botmatch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Generative fallback configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Key-value store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Matching pipeline configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Provider backend: "huggingface" or "offline"
    #[serde(default = "default_embedding_provider")]
    pub provider: String,

    /// Base URL of the feature-extraction endpoint
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Model identifier appended to the base URL
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// API token (can also be set via HF_API_TOKEN env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Vector dimensionality produced by the model
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_provider() -> String {
    "huggingface".to_string()
}

fn default_embedding_base_url() -> String {
    "https://api-inference.huggingface.co/pipeline/feature-extraction".to_string()
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

const fn default_embedding_dimension() -> usize {
    384
}

const fn default_embedding_timeout() -> u64 {
    10
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_token: None,
            dimension: default_embedding_dimension(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

/// Generative fallback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Base URL of the chat-completion API
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    /// Model to use
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// API key (can also be set via OPENAI_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens in the generated reply
    #[serde(default = "default_generation_max_tokens")]
    pub max_tokens: u32,
}

fn default_generation_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_generation_timeout() -> u64 {
    20
}

const fn default_generation_max_tokens() -> u32 {
    256
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            api_key: None,
            timeout_secs: default_generation_timeout(),
            max_tokens: default_generation_max_tokens(),
        }
    }
}

/// Key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_store_path() -> String {
    ".botmatch/botmatch.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Matching pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchingConfig {
    /// Minimum cosine similarity for a semantic match (strict inequality)
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Whether a triggered /filter stage replaces an earlier keyword hit
    #[serde(default = "default_category_overrides_keyword")]
    pub category_overrides_keyword: bool,

    /// Maximum queries retained per user in search history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

const fn default_similarity_threshold() -> f32 {
    0.30
}

const fn default_category_overrides_keyword() -> bool {
    true
}

const fn default_history_limit() -> usize {
    5
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            category_overrides_keyword: default_category_overrides_keyword(),
            history_limit: default_history_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

pub mod bot;
pub mod config;
pub mod history;
pub mod match_result;
pub mod query;

pub use bot::{BotEntry, Catalog};
pub use config::{
    Config, EmbeddingConfig, GenerationConfig, LoggingConfig, MatchingConfig, StoreConfig,
};
pub use history::{HistoryEntry, SearchHistory};
pub use match_result::{MatchKind, MatchResult};
pub use query::{SearchQuery, FILTER_MARKER};

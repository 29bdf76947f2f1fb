//! Per-user search history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Normalized query text
    pub query: String,
    /// When the query was handled
    pub searched_at: DateTime<Utc>,
}

/// Bounded, ordered sequence of a user's recent queries, newest last.
///
/// Eviction is FIFO: when the cap is reached the oldest entry goes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query, evicting from the front until `limit` holds.
    pub fn push(&mut self, query: impl Into<String>, limit: usize) {
        self.entries.push(HistoryEntry { query: query.into(), searched_at: Utc::now() });
        while self.entries.len() > limit {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Search query domain model.

use serde::{Deserialize, Serialize};

/// Marker prefix that routes a query to the category filter stage.
pub const FILTER_MARKER: &str = "/filter";

/// A user query carrying both the raw text and its normalized form.
///
/// Normalization is trim + lowercase and happens exactly once, at
/// construction; every matching stage reads the normalized form while the
/// generative fallback receives the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True when normalization left no text to match against.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// The category name when this query starts with the `/filter` marker.
    ///
    /// No space is required after the marker; the remainder is trimmed.
    /// A bare `/filter` yields an empty category name.
    pub fn filter_category(&self) -> Option<&str> {
        self.normalized.strip_prefix(FILTER_MARKER).map(str::trim)
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

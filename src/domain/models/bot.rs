//! Bot catalog domain model.
//!
//! A `BotEntry` is one recommendable bot; a `Catalog` is the ordered
//! snapshot of every entry as read at the start of one request. Entry
//! identity within a request is the snapshot index (embeddings are
//! aligned to it); `name` is the stable key across requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One catalog record describing a recommendable bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotEntry {
    /// External identifier (informational, not used for matching)
    #[serde(default)]
    pub id: String,
    /// Display name; the stable cross-request key
    #[serde(default)]
    pub name: String,
    /// Category used by the /filter stage (matched case-insensitively)
    #[serde(default)]
    pub category: String,
    /// Free-text description; keyword and semantic stages match against it
    #[serde(default)]
    pub description: String,
    /// Link included in every reply
    #[serde(default)]
    pub link: String,
    /// Aggregate user rating (informational)
    #[serde(default)]
    pub rating: f32,
    /// Usage tips (informational)
    #[serde(default)]
    pub tips: String,
}

impl BotEntry {
    /// Create an entry with the fields the matching pipeline reads.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            category: category.into(),
            description: description.into(),
            link: link.into(),
            rating: 0.0,
            tips: String::new(),
        }
    }

    /// Whether an already-normalized (trimmed, lowercased) query is a
    /// substring of this entry's name or description.
    pub fn matches_keyword(&self, normalized_query: &str) -> bool {
        self.name.to_lowercase().contains(normalized_query)
            || self.description.to_lowercase().contains(normalized_query)
    }

    /// Case-insensitive equality against this entry's category.
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

/// Ordered snapshot of the bot catalog for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<BotEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<BotEntry>) -> Self {
        Self { entries }
    }

    /// Normalize a raw store value into an ordered catalog.
    ///
    /// The store may hold either a JSON sequence of entries or a JSON
    /// mapping `name -> entry`. Normalization happens once, here; nothing
    /// downstream branches on shape. Mapping payloads are ordered by key
    /// so snapshot indices are deterministic, and an entry without its own
    /// `name` inherits the mapping key. Entries that fail to deserialize
    /// or end up nameless are skipped with a warning.
    pub fn from_value(value: Value) -> Self {
        let entries = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter_map(|(position, item)| match serde_json::from_value::<BotEntry>(item) {
                    Ok(entry) if !entry.name.is_empty() => Some(entry),
                    Ok(_) => {
                        warn!(position, "skipping catalog entry without a name");
                        None
                    }
                    Err(error) => {
                        warn!(position, %error, "skipping malformed catalog entry");
                        None
                    }
                })
                .collect(),
            Value::Object(map) => {
                let mut pairs: Vec<(String, Value)> = map.into_iter().collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                pairs
                    .into_iter()
                    .filter_map(|(key, item)| match serde_json::from_value::<BotEntry>(item) {
                        Ok(mut entry) => {
                            if entry.name.is_empty() {
                                entry.name = key;
                            }
                            Some(entry)
                        }
                        Err(error) => {
                            warn!(key = %key, %error, "skipping malformed catalog entry");
                            None
                        }
                    })
                    .collect()
            }
            Value::Null => Vec::new(),
            other => {
                warn!(
                    shape = other_shape_name(&other),
                    "catalog payload has unsupported shape, treating as empty"
                );
                Vec::new()
            }
        };

        Self { entries }
    }

    pub fn entries(&self) -> &[BotEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&BotEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BotEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BotEntry;
    type IntoIter = std::slice::Iter<'a, BotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn other_shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

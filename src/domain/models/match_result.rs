//! Match result domain model.
//!
//! The reply text is part of the engine's contract: the transport layer
//! treats it as an opaque string, so every format below is load-bearing.

use serde::{Deserialize, Serialize};

use super::bot::BotEntry;

/// Which pipeline stage produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Substring hit on an entry's name or description
    Keyword,
    /// `/filter` listing of one category
    Category,
    /// Embedding cosine-similarity hit above the threshold
    Semantic,
    /// Free-form text from the generative fallback
    Generative,
    /// Reply-only outcome: empty catalog or an internal fault
    Unavailable,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Category => "category",
            Self::Semantic => "semantic",
            Self::Generative => "generative",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked decision from the matching pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Stage that produced this result
    pub kind: MatchKind,
    /// Matched entry for single-entry outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<BotEntry>,
    /// Cosine similarity for semantic outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    /// Opaque reply handed back to the transport
    pub reply: String,
}

impl MatchResult {
    /// Keyword-stage hit.
    pub fn keyword(entry: BotEntry) -> Self {
        let reply = best_match_reply(&entry);
        Self { kind: MatchKind::Keyword, entry: Some(entry), similarity: None, reply }
    }

    /// Semantic-stage hit with its winning similarity.
    pub fn semantic(entry: BotEntry, similarity: f32) -> Self {
        let reply = best_match_reply(&entry);
        Self { kind: MatchKind::Semantic, entry: Some(entry), similarity: Some(similarity), reply }
    }

    /// Category-stage listing; `matches` may be empty.
    pub fn category_listing(category: &str, matches: &[BotEntry]) -> Self {
        let reply = if matches.is_empty() {
            format!("No bots found for category '{category}'.")
        } else {
            let blocks: Vec<String> = matches
                .iter()
                .map(|entry| {
                    format!(
                        "{}\nDescription: {}\nLink: {}",
                        entry.name, entry.description, entry.link
                    )
                })
                .collect();
            format!("Bots in category '{category}':\n{}", blocks.join("\n\n"))
        };
        Self { kind: MatchKind::Category, entry: None, similarity: None, reply }
    }

    /// Verbatim text from the generative fallback.
    pub fn generative(reply: impl Into<String>) -> Self {
        Self { kind: MatchKind::Generative, entry: None, similarity: None, reply: reply.into() }
    }

    /// Generative fallback failed; the reason becomes the reply.
    pub fn generation_failed(reason: &str) -> Self {
        Self {
            kind: MatchKind::Generative,
            entry: None,
            similarity: None,
            reply: format!("Error generating recommendation: {reason}"),
        }
    }

    /// Empty catalog: nothing to match against.
    pub fn no_data() -> Self {
        Self {
            kind: MatchKind::Unavailable,
            entry: None,
            similarity: None,
            reply: "No bot data available yet.".to_string(),
        }
    }

    /// Internal fault caught at the handler boundary.
    pub fn failure(reason: &str) -> Self {
        Self {
            kind: MatchKind::Unavailable,
            entry: None,
            similarity: None,
            reply: format!("Something went wrong while searching: {reason}"),
        }
    }
}

fn best_match_reply(entry: &BotEntry) -> String {
    format!(
        "Best match: {}\nDescription: {}\nLink: {}",
        entry.name, entry.description, entry.link
    )
}

//! Table output formatting for CLI commands
//!
//! Formats catalog entries and search history using comfy-table, with
//! color support gated on the usual terminal environment checks.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{BotEntry, HistoryEntry};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format catalog entries as a table
    pub fn format_entries(&self, entries: &[BotEntry]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Rating").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Link").add_attribute(Attribute::Bold),
        ]);

        for entry in entries {
            let category_cell = if self.use_colors {
                Cell::new(&entry.category).fg(Color::Cyan)
            } else {
                Cell::new(&entry.category)
            };

            let rating = if entry.rating > 0.0 {
                format!("{:.1}", entry.rating)
            } else {
                "-".to_string()
            };

            table.add_row(vec![
                Cell::new(&entry.name),
                category_cell,
                Cell::new(rating),
                Cell::new(truncate_text(&entry.description, 40)),
                Cell::new(&entry.link),
            ]);
        }

        table.to_string()
    }

    /// Format search history as a table
    pub fn format_history(&self, entries: &[HistoryEntry]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Searched At").add_attribute(Attribute::Bold),
            Cell::new("Query").add_attribute(Attribute::Bold),
        ]);

        for entry in entries {
            table.add_row(vec![
                Cell::new(entry.searched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
                Cell::new(truncate_text(&entry.query, 60)),
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Truncate text to a maximum character count with ellipsis. Counts and
/// cuts by characters, never bytes, so multi-byte text stays intact.
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{prefix}...")
    }
}

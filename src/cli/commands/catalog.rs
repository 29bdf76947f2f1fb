//! Implementation of the `botmatch catalog` commands.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;
use tokio::fs;

use crate::cli::context::AppContext;
use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{BotEntry, Catalog, Config};
use crate::domain::ports::{CatalogStore, EmbeddingCacheStore};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog entries
    List {
        /// Filter by category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of entries to display
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Replace the catalog from a JSON or YAML file
    Seed {
        /// Path to a JSON or YAML file holding an array of entries or a
        /// name-keyed object
        file: PathBuf,
    },
}

pub async fn execute(command: CatalogCommands, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;

    match command {
        CatalogCommands::List { category, limit } => {
            handle_list(&context, category, limit, json_mode).await
        }
        CatalogCommands::Seed { file } => handle_seed(&context, &file, json_mode).await,
    }
}

async fn handle_list(
    context: &AppContext,
    category: Option<String>,
    limit: usize,
    json_mode: bool,
) -> Result<()> {
    let catalog = CatalogStore::load(&context.store)
        .await
        .context("Failed to load catalog")?;

    let entries: Vec<BotEntry> = catalog
        .iter()
        .filter(|entry| {
            category
                .as_deref()
                .map_or(true, |category| entry.matches_category(category))
        })
        .take(limit)
        .cloned()
        .collect();

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        if entries.is_empty() {
            println!("No catalog entries found.");
            return Ok(());
        }

        println!("{}", TableFormatter::new().format_entries(&entries));
        println!(
            "\nShowing {} entr{}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}

#[derive(Debug, serde::Serialize)]
pub struct SeedOutput {
    pub success: bool,
    pub message: String,
    pub entries: usize,
    pub source: PathBuf,
}

impl CommandOutput for SeedOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Parse a seed file into the store's document shape, dispatching on the
/// file extension: `.yaml`/`.yml` is YAML, anything else is JSON.
fn parse_seed_document(file: &Path, content: &str) -> Result<serde_json::Value> {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse {} as YAML", file.display())),
        _ => serde_json::from_str(content)
            .with_context(|| format!("Failed to parse {} as JSON", file.display())),
    }
}

async fn handle_seed(context: &AppContext, file: &PathBuf, json_mode: bool) -> Result<()> {
    let content = fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value = parse_seed_document(file, &content)?;

    let catalog = Catalog::from_value(value);

    let spinner = (!json_mode).then(|| create_spinner("Seeding catalog..."));

    CatalogStore::replace(&context.store, catalog.entries())
        .await
        .context("Failed to replace catalog")?;

    // Snapshot indices shift under a new catalog, so the old embedding
    // mapping is invalid; clear it and let the next query rebuild.
    EmbeddingCacheStore::replace(&context.store, &BTreeMap::new())
        .await
        .context("Failed to clear embedding cache")?;

    if let Some(spinner) = spinner {
        spinner.finish_success(format!("Seeded {} entries", catalog.len()));
    }

    let output_data = SeedOutput {
        success: true,
        message: format!(
            "Catalog replaced with {} entr{} from {}.",
            catalog.len(),
            if catalog.len() == 1 { "y" } else { "ies" },
            file.display()
        ),
        entries: catalog.len(),
        source: file.clone(),
    };
    output(&output_data, json_mode);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses_json_array() {
        let value =
            parse_seed_document(Path::new("bots.json"), r#"[{"name": "WeatherBot"}]"#).unwrap();

        let catalog = Catalog::from_value(value);
        assert_eq!(catalog.get(0).unwrap().name, "WeatherBot");
    }

    #[test]
    fn test_seed_parses_yaml_list() {
        let content = "\
- name: WeatherBot
  category: weather
  description: weather updates
  link: t.me/weatherbot
- name: NewsBot
  category: news
";
        let value = parse_seed_document(Path::new("bots.yaml"), content).unwrap();

        let catalog = Catalog::from_value(value);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().name, "WeatherBot");
        assert_eq!(catalog.get(1).unwrap().category, "news");
    }

    #[test]
    fn test_seed_parses_yaml_mapping_with_yml_extension() {
        let content = "WeatherBot:\n  description: weather updates\n";
        let value = parse_seed_document(Path::new("bots.yml"), content).unwrap();

        // A name-keyed mapping inherits the key as the entry name.
        let catalog = Catalog::from_value(value);
        assert_eq!(catalog.get(0).unwrap().name, "WeatherBot");
    }

    #[test]
    fn test_seed_rejects_malformed_json() {
        let result = parse_seed_document(Path::new("bots.json"), "{not json");
        assert!(result.unwrap_err().to_string().contains("as JSON"));
    }
}

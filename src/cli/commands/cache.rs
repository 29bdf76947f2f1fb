//! Implementation of the `botmatch cache` commands.

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use clap::Subcommand;

use crate::cli::context::AppContext;
use crate::cli::output::progress::{create_progress_bar, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::domain::ports::{CatalogStore, EmbeddingCacheStore};

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show embedding cache coverage against the current catalog
    Status,

    /// Rebuild the embedding cache from the current catalog
    Rebuild,
}

pub async fn execute(command: CacheCommands, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;

    match command {
        CacheCommands::Status => handle_status(&context, json_mode).await,
        CacheCommands::Rebuild => handle_rebuild(&context, json_mode).await,
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CacheStatusOutput {
    pub catalog_entries: usize,
    pub cached_embeddings: usize,
    pub dimension: usize,
    pub in_sync: bool,
}

impl CommandOutput for CacheStatusOutput {
    fn to_human(&self) -> String {
        format!(
            "Catalog entries:    {}\nCached embeddings:  {}\nVector dimension:   {}\nIn sync:            {}",
            self.catalog_entries,
            self.cached_embeddings,
            self.dimension,
            if self.in_sync { "yes" } else { "no" }
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

async fn handle_status(context: &AppContext, json_mode: bool) -> Result<()> {
    let catalog = CatalogStore::load(&context.store)
        .await
        .context("Failed to load catalog")?;
    let cached = EmbeddingCacheStore::load(&context.store)
        .await
        .context("Failed to load embedding cache")?;

    let in_sync = cached.len() == catalog.len()
        && (0..catalog.len()).all(|index| cached.contains_key(&index));

    let output_data = CacheStatusOutput {
        catalog_entries: catalog.len(),
        cached_embeddings: cached.len(),
        dimension: context.embedder.dimension(),
        in_sync,
    };
    output(&output_data, json_mode);

    Ok(())
}

#[derive(Debug, serde::Serialize)]
pub struct RebuildOutput {
    pub success: bool,
    pub message: String,
    pub embedded: usize,
    pub dimension: usize,
}

impl CommandOutput for RebuildOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

async fn handle_rebuild(context: &AppContext, json_mode: bool) -> Result<()> {
    let catalog = CatalogStore::load(&context.store)
        .await
        .context("Failed to load catalog")?;

    if catalog.is_empty() {
        let output_data = RebuildOutput {
            success: false,
            message: "Catalog is empty, nothing to embed.".to_string(),
            embedded: 0,
            dimension: context.embedder.dimension(),
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    let progress = (!json_mode).then(|| create_progress_bar(catalog.len() as u64));

    let mut embeddings = BTreeMap::new();
    for (index, entry) in catalog.iter().enumerate() {
        if let Some(progress) = &progress {
            progress.set_message(entry.name.clone());
        }
        embeddings.insert(index, context.embedder.embed(&entry.description).await);
        if let Some(progress) = &progress {
            progress.inc(1);
        }
    }

    EmbeddingCacheStore::replace(&context.store, &embeddings)
        .await
        .context("Failed to persist embedding cache")?;

    if let Some(progress) = progress {
        progress.finish_success(format!("Embedded {} entries", catalog.len()));
    }

    let output_data = RebuildOutput {
        success: true,
        message: format!(
            "Rebuilt embedding cache for {} entr{}.",
            catalog.len(),
            if catalog.len() == 1 { "y" } else { "ies" }
        ),
        embedded: catalog.len(),
        dimension: context.embedder.dimension(),
    };
    output(&output_data, json_mode);

    Ok(())
}

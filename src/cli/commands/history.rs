//! Implementation of the `botmatch history` command.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::cli::context::AppContext;
use crate::cli::output::TableFormatter;
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// User identifier
    #[arg(default_value = "cli")]
    pub user: String,
}

pub async fn execute(args: HistoryArgs, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;

    let history = context
        .handler
        .history(&args.user)
        .await
        .context("Failed to load search history")?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(history.entries())?);
    } else {
        if history.is_empty() {
            println!("No searches recorded for '{}'.", args.user);
            return Ok(());
        }

        println!("Recent searches for '{}':", args.user);
        println!("{}", TableFormatter::new().format_history(history.entries()));
    }

    Ok(())
}

//! Command-line interface: argument parsing, dispatch context, output helpers.

pub mod commands;
pub mod context;
pub mod output;

// Re-export commonly used items
pub use context::AppContext;
pub use output::{output, CommandOutput};

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "botmatch")]
#[command(about = "Botmatch - layered bot recommendation engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of the default hierarchy
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize botmatch configuration and database
    Init(commands::init::InitArgs),

    /// Resolve a query against the bot catalog
    Query(commands::query::QueryArgs),

    /// Bot catalog commands
    #[command(subcommand)]
    Catalog(commands::catalog::CatalogCommands),

    /// Embedding cache commands
    #[command(subcommand)]
    Cache(commands::cache::CacheCommands),

    /// Show a user's recent searches
    History(commands::history::HistoryArgs),
}

/// Print a top-level error in the selected output mode and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{payload:#}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

//! Botmatch CLI entry point.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use botmatch::cli::{Cli, Commands};
use botmatch::domain::models::{Config, LoggingConfig};
use botmatch::infrastructure::{config::ConfigLoader, logging};

/// Load configuration and bring up the tracing stack for commands that need
/// a fully wired runtime.
fn init_runtime(config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    logging::init(&config.logging)?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        botmatch::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        // Init runs before any config file exists, so it logs with defaults.
        Commands::Init(args) => {
            logging::init(&LoggingConfig::default())?;
            botmatch::cli::commands::init::execute(args, json).await
        }
        Commands::Query(args) => {
            let config = init_runtime(cli.config.as_deref())?;
            botmatch::cli::commands::query::execute(args, config, json).await
        }
        Commands::Catalog(command) => {
            let config = init_runtime(cli.config.as_deref())?;
            botmatch::cli::commands::catalog::execute(command, config, json).await
        }
        Commands::Cache(command) => {
            let config = init_runtime(cli.config.as_deref())?;
            botmatch::cli::commands::cache::execute(command, config, json).await
        }
        Commands::History(args) => {
            let config = init_runtime(cli.config.as_deref())?;
            botmatch::cli::commands::history::execute(args, config, json).await
        }
    }
}

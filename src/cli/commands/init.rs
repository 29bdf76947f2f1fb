//! Implementation of the `botmatch init` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::setup::{
    create_config_dir, create_config_file, run_migrations, SetupPaths,
};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
    pub database_file: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.success {
            lines.push(format!("\nConfig file:   {}", self.config_file.display()));
            lines.push(format!("Database file: {}", self.database_file.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let paths = SetupPaths::new()?;

    if paths.is_initialized() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            config_file: paths.config_file,
            database_file: paths.database_file,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    create_config_dir(&paths, args.force)?;
    create_config_file(&paths, args.force)?;
    run_migrations(&paths, args.force).await?;

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        config_file: paths.config_file,
        database_file: paths.database_file,
    };

    output(&output_data, json_mode);
    Ok(())
}

//! Implementation of the `botmatch query` command.

use anyhow::Result;
use clap::Args;

use crate::cli::context::AppContext;
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query text
    pub text: String,

    /// User identifier recorded in search history
    #[arg(short, long, default_value = "cli")]
    pub user: String,
}

pub async fn execute(args: QueryArgs, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;
    let result = context.handler.handle(&args.user, &args.text).await;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.reply);
    }

    Ok(())
}

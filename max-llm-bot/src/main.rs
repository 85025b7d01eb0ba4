//! max-llm-bot: entry point. Loads `.env`, parses the CLI and runs the bot.

use anyhow::Result;
use clap::Parser;
use max_llm_bot::{run_bot, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
    }
}

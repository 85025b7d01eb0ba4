//! Command-line interface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "max-llm-bot")]
#[command(about = "MAX messenger bot backed by GigaChat", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

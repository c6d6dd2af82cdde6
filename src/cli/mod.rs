pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "devconnector-api")]
#[command(about = "DevConnector API - developer profiles over HTTP")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default)")]
    Serve,

    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "Mint a development token for a user id")]
    Token {
        #[arg(long, help = "User id to embed in the token")]
        user: uuid::Uuid,
        #[arg(long, help = "Token lifetime in hours (defaults to configured expiry)")]
        hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config().clone();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::server::handle(config).await,
        Commands::Migrate => commands::migrate::handle(config, output_format).await,
        Commands::Token { user, hours } => commands::token::handle(config, user, hours, output_format),
    }
}

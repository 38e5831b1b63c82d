//! tablero - Kanban board viewer and store walkthrough
//!
//! The board lives in memory only; `board` and `show` render a snapshot
//! from the configured source, `walkthrough` drives the full mutation API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tablero")]
#[command(about = "In-memory Kanban board")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a .tablero/config.toml in the current directory
    Init {
        /// Content-feed base URL (demo board when omitted)
        #[arg(long)]
        feed_url: Option<String>,

        /// Display name for the local user
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the board from the configured source
    Board,

    /// Show one task in detail
    Show {
        /// Task ID
        id: String,
    },

    /// Drive the full mutation API against a seeded store
    Walkthrough,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { feed_url, name } => commands::init(feed_url, name),
        Commands::Board => commands::board(cli.json).await,
        Commands::Show { id } => commands::show(&id, cli.json).await,
        Commands::Walkthrough => commands::walkthrough(cli.json).await,
    }
}

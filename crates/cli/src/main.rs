//! `job-board` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve` — start the API server.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use db::PgJobPostingStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "job-board",
    about = "Read-only job posting listing and statistics API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        /// Postgres connection string. Required.
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: String,
        #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
        max_connections: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, database_url, max_connections } => {
            let pool = db::pool::create_pool(&database_url, max_connections)
                .context("invalid DATABASE_URL")?;
            let store = Arc::new(PgJobPostingStore::new(pool));

            info!("Starting API server on {bind}");
            api::serve(&bind, store)
                .await
                .with_context(|| format!("server on {bind} failed"))?;
        }
    }

    Ok(())
}

//! warbler CLI - run the Warbler web application
//!
//! - `serve` starts the HTTP server
//! - `migrate` creates any missing tables
//! - `reset-db` drops and recreates every table

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "warbler", author, version, about = "Warbler, a tiny social network")]
struct Cli {
    /// Debug logging with targets (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes
    Migrate(commands::db::DbArgs),
    /// Drop all tables and recreate them (destroys data)
    ResetDb(commands::db::DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::ResetDb(args) => commands::run_reset_db(args).await?,
    }
    Ok(())
}

//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use warbler_server::db::{create_pool, migrations, PoolConfig};
use warbler_server::http::server::DEFAULT_SECRET_KEY;
use warbler_server::{run_server, ServerConfig};

use super::DEFAULT_DATABASE_URL;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum open database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = PoolConfig::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Secret the session cookie key is derived from
    #[arg(long, env = "SECRET_KEY", default_value = DEFAULT_SECRET_KEY, hide_default_value = true)]
    pub secret_key: String,

    /// Directory served under /static (defaults to the bundled assets)
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting warbler on {}", args.bind);

    let pool_config = PoolConfig::new(args.database_url).max_connections(args.max_connections);
    let pool = create_pool(&pool_config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create tables")?;

    let defaults = ServerConfig::default();
    let config = ServerConfig {
        bind_addr: args.bind,
        secret_key: args.secret_key,
        static_dir: args.static_dir.unwrap_or(defaults.static_dir),
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

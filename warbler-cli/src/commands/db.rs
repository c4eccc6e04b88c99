//! Schema maintenance commands

use anyhow::{Context, Result};
use clap::Parser;

use warbler_server::db::{create_pool, migrations, PgPool, PoolConfig};

use super::DEFAULT_DATABASE_URL;

/// Arguments shared by the database commands
#[derive(Parser, Debug)]
pub struct DbArgs {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum open database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = PoolConfig::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DbArgs {
    async fn connect(&self) -> Result<PgPool> {
        let config = PoolConfig::new(self.database_url.as_str()).max_connections(self.max_connections);
        create_pool(&config)
            .await
            .context("Failed to create database pool")
    }
}

pub async fn run_migrate(args: DbArgs) -> Result<()> {
    let pool = args.connect().await?;
    migrations::run(&pool).await.context("Migration failed")?;

    tracing::info!("Schema is up to date");
    Ok(())
}

pub async fn run_reset_db(args: DbArgs) -> Result<()> {
    let pool = args.connect().await?;
    migrations::reset(&pool).await.context("Reset failed")?;

    tracing::warn!("All tables dropped and recreated");
    Ok(())
}

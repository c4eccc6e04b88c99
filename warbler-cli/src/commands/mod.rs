//! Command implementations for the warbler CLI

pub mod db;
pub mod serve;

pub use db::{run_migrate, run_reset_db};
pub use serve::run_serve;

/// Database used when neither `--database-url` nor `DATABASE_URL` is set
pub const DEFAULT_DATABASE_URL: &str = "postgres:///warbler";

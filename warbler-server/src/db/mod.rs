//! Database layer - connection pool, schema and repositories
//!
//! - Rely on DB constraints and handle conflicts, no check-then-insert
//! - List queries JOIN the author in, no N+1
//! - Deleting a user cascades to messages, follows and likes

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, PoolConfig};
pub use sqlx::PgPool;
pub use repos::*;

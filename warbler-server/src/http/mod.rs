//! HTTP layer
//!
//! Axum server with:
//! - Server-rendered askama pages
//! - Signed cookie session
//! - Request tracing
//! - No-cache response headers
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::AppError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};

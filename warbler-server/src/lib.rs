//! warbler-server: a small social network over HTTP
//!
//! Users sign up, post short messages, follow each other and like
//! messages. Pages are rendered server-side with askama templates; state
//! lives in PostgreSQL and in a signed session cookie.

pub mod auth;
pub mod db;
pub mod forms;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};

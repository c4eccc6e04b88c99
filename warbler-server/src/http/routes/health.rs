//! Liveness plus a database round-trip

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Longest the database ping may take before it counts as down
const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    fn new(database_up: bool) -> (StatusCode, Self) {
        let (code, status, database) = if database_up {
            (StatusCode::OK, "ok", "up")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        };
        let body = Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        };
        (code, body)
    }
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = sqlx::query("SELECT 1").execute(state.pool());
    let database_up = match tokio::time::timeout(DB_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::warn!("health check: database error: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!("health check: database ping timed out");
            false
        }
    };

    let (code, body) = HealthResponse::new(database_up);
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

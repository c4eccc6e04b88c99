//! Application error type with IntoResponse
//!
//! Errors render as HTML pages. Internal details are logged, never shown.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::views::{NotFoundTemplate, ServerErrorTemplate};
use crate::db::DbError;

/// Handler error with automatic HTTP status mapping
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Template failed to render (500, logged)
    Template(askama::Error),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, %id, "not found");
                NotFoundTemplate.render()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                ServerErrorTemplate.render()
            }
            Self::Template(e) => {
                tracing::error!("Template error: {}", e);
                ServerErrorTemplate.render()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                ServerErrorTemplate.render()
            }
        };

        let body = page.unwrap_or_else(|_| status.to_string());
        (status, Html(body)).into_response()
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        Self::Template(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404_page() {
        let err = AppError::NotFound {
            resource: "user",
            id: "42".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Page not found"));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = AppError::Internal {
            message: "secret connection string".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(!html.contains("secret connection string"));
    }

    #[test]
    fn db_not_found_maps_to_404() {
        let err = AppError::from(DbError::NotFound {
            resource: "message",
            id: "9".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(DbError::Conflict {
            constraint: "users_username_key".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

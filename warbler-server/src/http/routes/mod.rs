//! Route handlers organized by resource

pub mod auth;
pub mod follows;
pub mod health;
pub mod home;
pub mod likes;
pub mod messages;
pub mod users;

use axum::http::{header, HeaderMap};

use super::error::AppError;

/// Fallback for unmatched paths
pub async fn not_found() -> AppError {
    AppError::NotFound {
        resource: "page",
        id: String::new(),
    }
}

/// Where to send the browser back to after a form post.
///
/// Only same-site targets are honoured: a path, or an absolute URL whose
/// authority matches the request's Host. Anything else goes to `/`.
pub(crate) fn back_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return "/".to_owned();
    };

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let rest = referer
        .strip_prefix("http://")
        .or_else(|| referer.strip_prefix("https://"));

    let path = match (rest, host) {
        (Some(rest), Some(host)) => {
            let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
            if !authority.eq_ignore_ascii_case(host) {
                return "/".to_owned();
            }
            if path.is_empty() {
                return "/".to_owned();
            }
            path
        }
        (Some(_), None) => return "/".to_owned(),
        (None, _) => referer,
    };

    if is_local_path(path) {
        path.to_owned()
    } else {
        "/".to_owned()
    }
}

/// A path on this site: `//host` and `/\host` are read as other sites.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

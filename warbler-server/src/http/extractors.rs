//! Custom Axum extractors for the logged-in user

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use super::error::AppError;
use super::server::AppState;
use crate::auth::{FlashCategory, Session};
use crate::db::{User, UserRepo};

/// Flash shown when a protected route is hit without a login
pub const UNAUTHORIZED: &str = "Access unauthorized.";

/// The logged-in user, if any
///
/// A session pointing at a deleted user is cleared.
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, reason)| AppError::Internal {
                message: reason.to_owned(),
            })?;

        let Some(user_id) = session.user_id() else {
            return Ok(Self(None));
        };

        let user = UserRepo::new(state.pool()).find(user_id).await?;
        if user.is_none() {
            tracing::debug!(user_id, "session user no longer exists");
            session.logout();
        }
        Ok(Self(user))
    }
}

/// The logged-in user; rejects with a flash and a redirect to `/`
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(Self(user)),
            None => {
                let session = Session::from_request_parts(parts, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                session.flash(FlashCategory::Danger, UNAUTHORIZED);
                Err(Redirect::to("/").into_response())
            }
        }
    }
}

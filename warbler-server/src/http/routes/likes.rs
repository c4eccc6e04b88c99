//! Liking and unliking messages

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::routing::post;
use axum::Router;

use super::back_target;
use crate::auth::{FlashCategory, Session};
use crate::db::{LikeRepo, MessageRepo};
use crate::http::error::AppError;
use crate::http::extractors::AuthUser;
use crate::http::server::AppState;

/// POST /users/add_like/{message_id}
async fn add_like(
    State(state): State<AppState>,
    session: Session,
    AuthUser(me): AuthUser,
    Path(message_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let pool = state.pool();
    let message = MessageRepo::new(pool).get(message_id).await?;

    if message.user_id == me.id {
        session.flash(FlashCategory::Danger, "You cannot like your own message.");
    } else {
        LikeRepo::new(pool).like(me.id, message.id).await?;
    }
    Ok(Redirect::to(&back_target(&headers)))
}

/// POST /users/remove_like/{message_id}
async fn remove_like(
    State(state): State<AppState>,
    AuthUser(me): AuthUser,
    Path(message_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    LikeRepo::new(state.pool()).unlike(me.id, message_id).await?;
    Ok(Redirect::to(&back_target(&headers)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/add_like/{message_id}", post(add_like))
        .route("/users/remove_like/{message_id}", post(remove_like))
}

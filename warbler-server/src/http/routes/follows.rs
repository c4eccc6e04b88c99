//! Follow and unfollow actions

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::routing::post;
use axum::Router;

use crate::auth::{FlashCategory, Session};
use crate::db::FollowRepo;
use crate::http::error::AppError;
use crate::http::extractors::AuthUser;
use crate::http::server::AppState;

fn following_page(user_id: i32) -> Redirect {
    Redirect::to(&format!("/users/{user_id}/following"))
}

/// POST /users/follow/{id}
async fn follow(
    State(state): State<AppState>,
    session: Session,
    AuthUser(me): AuthUser,
    Path(follow_id): Path<i32>,
) -> Result<Redirect, AppError> {
    if follow_id == me.id {
        session.flash(FlashCategory::Danger, "You cannot follow yourself.");
        return Ok(following_page(me.id));
    }

    FollowRepo::new(state.pool()).follow(me.id, follow_id).await?;
    tracing::debug!(user_id = me.id, follow_id, "followed user");
    Ok(following_page(me.id))
}

/// POST /users/stop-following/{id}
async fn stop_following(
    State(state): State<AppState>,
    AuthUser(me): AuthUser,
    Path(follow_id): Path<i32>,
) -> Result<Redirect, AppError> {
    FollowRepo::new(state.pool()).unfollow(me.id, follow_id).await?;
    Ok(following_page(me.id))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/follow/{id}", post(follow))
        .route("/users/stop-following/{id}", post(stop_following))
}

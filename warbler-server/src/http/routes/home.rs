//! Homepage: landing page or the logged-in user's timeline

use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::auth::Session;
use crate::db::{LikeRepo, MessageRepo, UserRepo};
use crate::http::error::AppError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::views::{
    render, HomeAnonTemplate, HomeTemplate, MessageView, PageContext, Pager, UserCard,
};
use crate::models::{PaginationParams, MAX_PER_PAGE};

/// Timeline page size
const TIMELINE_LIMIT: u32 = MAX_PER_PAGE;

/// GET / - timeline of followed users and self, newest first
async fn homepage(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, AppError> {
    let Some(user) = user else {
        return render(HomeAnonTemplate {
            page: PageContext::new(&session, None),
        });
    };

    let pool = state.pool();
    let timeline = MessageRepo::new(pool)
        .timeline(user.id, params.with_per_page(TIMELINE_LIMIT))
        .await?;
    let liked = LikeRepo::new(pool).liked_ids(user.id).await?;
    let stats = UserRepo::new(pool).stats(user.id).await?;

    render(HomeTemplate {
        page: PageContext::new(&session, Some(&user)),
        me: UserCard::new(&user, Some(&user), &HashSet::new()),
        stats,
        messages: MessageView::all(&timeline.items, Some(&user), &liked),
        pager: Pager::new(&timeline, None),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(homepage))
}

//! User directory, profiles, profile edit and account deletion

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::{FlashCategory, Session};
use crate::db::{FollowRepo, LikeRepo, MessageRepo, User, UserRepo};
use crate::forms::{EditProfileForm, FormErrors};
use crate::http::error::AppError;
use crate::http::extractors::{AuthUser, CurrentUser};
use crate::http::server::AppState;
use crate::http::views::{
    render, EditProfileTemplate, MessageView, PageContext, Pager, ProfileView, UserCard,
    UserFollowsTemplate, UserIndexTemplate, UserLikesTemplate, UserShowTemplate,
};
use crate::models::Pagination;

/// Messages shown on a profile page
const PROFILE_MESSAGE_LIMIT: u32 = 100;

/// Users per directory page
const DIRECTORY_PAGE_SIZE: u32 = 24;

/// Directory query string
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryParams {
    pub q: Option<String>,
    pub page: Option<u32>,
}

/// Ids the viewer follows; empty when logged out.
async fn viewer_following(pool: &PgPool, viewer: Option<&User>) -> Result<HashSet<i32>, AppError> {
    match viewer {
        Some(v) => Ok(FollowRepo::new(pool).following_ids(v.id).await?),
        None => Ok(HashSet::new()),
    }
}

/// Ids of messages the viewer liked; empty when logged out.
async fn viewer_likes(pool: &PgPool, viewer: Option<&User>) -> Result<HashSet<i32>, AppError> {
    match viewer {
        Some(v) => Ok(LikeRepo::new(pool).liked_ids(v.id).await?),
        None => Ok(HashSet::new()),
    }
}

/// Load a profile header for `user_id` as seen by `viewer`.
async fn load_profile(
    pool: &PgPool,
    user_id: i32,
    viewer: Option<&User>,
    following: &HashSet<i32>,
) -> Result<ProfileView, AppError> {
    let users = UserRepo::new(pool);
    let user = users.get(user_id).await?;
    let stats = users.stats(user_id).await?;

    Ok(ProfileView {
        user: UserCard::new(&user, viewer, following),
        stats,
    })
}

/// GET /users - directory, optionally filtered by `q`
async fn list_users(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(viewer): CurrentUser,
    Query(params): Query<DirectoryParams>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let search = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let page = Pagination::new(params.page.unwrap_or(1), DIRECTORY_PAGE_SIZE);

    let users = UserRepo::new(pool).list(search, page).await?;
    let following = viewer_following(pool, viewer.as_ref()).await?;

    render(UserIndexTemplate {
        page: PageContext::new(&session, viewer.as_ref()),
        pager: Pager::new(&users, search),
        q: search.unwrap_or_default().to_owned(),
        users: users
            .items
            .iter()
            .map(|u| UserCard::new(u, viewer.as_ref(), &following))
            .collect(),
    })
}

/// GET /users/{id} - profile and messages
async fn show_user(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(viewer): CurrentUser,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let following = viewer_following(pool, viewer.as_ref()).await?;
    let profile = load_profile(pool, user_id, viewer.as_ref(), &following).await?;
    let messages = MessageRepo::new(pool)
        .for_user(user_id, PROFILE_MESSAGE_LIMIT)
        .await?;
    let liked = viewer_likes(pool, viewer.as_ref()).await?;

    render(UserShowTemplate {
        page: PageContext::new(&session, viewer.as_ref()),
        profile,
        messages: MessageView::all(&messages, viewer.as_ref(), &liked),
    })
}

/// Which side of the follow relation a list page shows
#[derive(Clone, Copy)]
enum FollowList {
    Following,
    Followers,
}

async fn follow_list(
    state: &AppState,
    session: &Session,
    viewer: &User,
    user_id: i32,
    list: FollowList,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let following = viewer_following(pool, Some(viewer)).await?;
    let profile = load_profile(pool, user_id, Some(viewer), &following).await?;

    let follows = FollowRepo::new(pool);
    let (heading, users) = match list {
        FollowList::Following => ("Following", follows.following(user_id).await?),
        FollowList::Followers => ("Followers", follows.followers(user_id).await?),
    };

    render(UserFollowsTemplate {
        page: PageContext::new(session, Some(viewer)),
        profile,
        heading,
        users: users
            .iter()
            .map(|u| UserCard::new(u, Some(viewer), &following))
            .collect(),
    })
}

/// GET /users/{id}/following
async fn show_following(
    State(state): State<AppState>,
    session: Session,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    follow_list(&state, &session, &viewer, user_id, FollowList::Following).await
}

/// GET /users/{id}/followers
async fn show_followers(
    State(state): State<AppState>,
    session: Session,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    follow_list(&state, &session, &viewer, user_id, FollowList::Followers).await
}

/// GET /users/{id}/likes - messages the user liked
async fn show_likes(
    State(state): State<AppState>,
    session: Session,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let following = viewer_following(pool, Some(&viewer)).await?;
    let profile = load_profile(pool, user_id, Some(&viewer), &following).await?;
    let messages = LikeRepo::new(pool).liked_messages(user_id).await?;
    let liked = viewer_likes(pool, Some(&viewer)).await?;

    render(UserLikesTemplate {
        page: PageContext::new(&session, Some(&viewer)),
        profile,
        messages: MessageView::all(&messages, Some(&viewer), &liked),
    })
}

fn edit_page(
    session: &Session,
    user: &User,
    form: EditProfileForm,
    errors: FormErrors,
) -> Result<Html<String>, AppError> {
    render(EditProfileTemplate {
        page: PageContext::new(session, Some(user)),
        form: EditProfileForm {
            password: String::new(),
            ..form
        },
        errors,
    })
}

/// GET /users/profile
async fn edit_profile_form(
    session: Session,
    AuthUser(user): AuthUser,
) -> Result<Html<String>, AppError> {
    edit_page(&session, &user, EditProfileForm::default(), FormErrors::new())
}

/// POST /users/profile - apply an edit after re-checking the password
async fn edit_profile(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Form(form): Form<EditProfileForm>,
) -> Result<Response, AppError> {
    let edit = match form.validate() {
        Ok(edit) => edit,
        Err(errors) => return Ok(edit_page(&session, &user, form, errors)?.into_response()),
    };

    if !user.check_password(&edit.password) {
        tracing::info!(user_id = user.id, "profile edit with wrong password");
        session.flash(
            FlashCategory::Danger,
            format!("Invalid password for {}.", user.username),
        );
        return Ok(Redirect::to("/users/profile").into_response());
    }

    match UserRepo::new(state.pool()).update_profile(user.id, &edit).await {
        Ok(updated) => {
            session.flash(FlashCategory::Success, "Profile updated.");
            Ok(Redirect::to(&format!("/users/{}", updated.id)).into_response())
        }
        Err(e) => match e.conflict_message() {
            Some(message) => {
                session.flash(FlashCategory::Danger, message);
                Ok(edit_page(&session, &user, form, FormErrors::new())?.into_response())
            }
            None => Err(e.into()),
        },
    }
}

/// POST /users/delete - log out and delete the account
async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
) -> Result<Redirect, AppError> {
    session.logout();
    UserRepo::new(state.pool()).delete(user.id).await?;
    Ok(Redirect::to("/signup"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/profile", get(edit_profile_form).post(edit_profile))
        .route("/users/delete", post(delete_user))
        .route("/users/{id}", get(show_user))
        .route("/users/{id}/following", get(show_following))
        .route("/users/{id}/followers", get(show_followers))
        .route("/users/{id}/likes", get(show_likes))
}

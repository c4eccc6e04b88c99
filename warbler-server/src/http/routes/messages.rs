//! Posting, showing and deleting messages

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::auth::{FlashCategory, Session};
use crate::db::{MessageRepo, User};
use crate::forms::{FormErrors, MessageForm};
use crate::http::error::AppError;
use crate::http::extractors::{AuthUser, CurrentUser, UNAUTHORIZED};
use crate::http::server::AppState;
use crate::http::views::{render, MessageShowTemplate, MessageView, NewMessageTemplate, PageContext};

fn new_message_page(
    session: &Session,
    user: &User,
    text: String,
    errors: FormErrors,
) -> Result<Html<String>, AppError> {
    render(NewMessageTemplate {
        page: PageContext::new(session, Some(user)),
        text,
        errors,
    })
}

/// GET /messages/new
async fn new_message_form(session: Session, AuthUser(user): AuthUser) -> Result<Html<String>, AppError> {
    new_message_page(&session, &user, String::new(), FormErrors::new())
}

/// POST /messages/new
async fn create_message(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Form(form): Form<MessageForm>,
) -> Result<Response, AppError> {
    let text = match form.validate() {
        Ok(text) => text,
        Err(errors) => return Ok(new_message_page(&session, &user, form.text, errors)?.into_response()),
    };

    let message = MessageRepo::new(state.pool()).create(user.id, &text).await?;
    tracing::debug!(user_id = user.id, message_id = message.id, "message posted");
    Ok(Redirect::to(&format!("/users/{}", user.id)).into_response())
}

/// GET /messages/{id}
async fn show_message(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(viewer): CurrentUser,
    Path(message_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let message = MessageRepo::new(state.pool()).get(message_id).await?;
    let can_delete = viewer.as_ref().is_some_and(|v| v.id == message.user_id);

    render(MessageShowTemplate {
        page: PageContext::new(&session, viewer.as_ref()),
        message: MessageView::new(&message, viewer.as_ref(), &Default::default()),
        can_delete,
    })
}

/// POST /messages/{id}/delete - authors only
async fn delete_message(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(message_id): Path<i32>,
) -> Result<Redirect, AppError> {
    let messages = MessageRepo::new(state.pool());
    let message = messages.get(message_id).await?;

    if message.user_id != user.id {
        tracing::info!(user_id = user.id, message_id, "refused message delete");
        session.flash(FlashCategory::Danger, UNAUTHORIZED);
        return Ok(Redirect::to("/"));
    }

    messages.delete_owned(message.id, user.id).await?;
    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/new", get(new_message_form).post(create_message))
        .route("/messages/{id}", get(show_message))
        .route("/messages/{id}/delete", post(delete_message))
}

//! Signup, login and logout

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};

use crate::auth::{FlashCategory, Session};
use crate::db::{User, UserRepo};
use crate::forms::{FormErrors, LoginForm, UserAddForm};
use crate::http::error::AppError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::views::{render, LoginTemplate, PageContext, SignupTemplate};

fn signup_page(
    session: &Session,
    user: Option<&User>,
    form: &UserAddForm,
    errors: FormErrors,
) -> Result<Html<String>, AppError> {
    render(SignupTemplate {
        page: PageContext::new(session, user),
        username: form.username.clone(),
        email: form.email.clone(),
        image_url: form.image_url.clone(),
        errors,
    })
}

/// GET /signup
async fn signup_form(
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    signup_page(&session, user.as_ref(), &UserAddForm::default(), FormErrors::new())
}

/// POST /signup - create the user and log them in
async fn signup(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(form): Form<UserAddForm>,
) -> Result<Response, AppError> {
    let new_user = match form.validate() {
        Ok(new_user) => new_user,
        Err(errors) => {
            return Ok(signup_page(&session, user.as_ref(), &form, errors)?.into_response());
        }
    };

    match UserRepo::new(state.pool()).signup(&new_user).await {
        Ok(created) => {
            session.login(created.id);
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => match e.conflict_message() {
            Some(message) => {
                session.flash(FlashCategory::Danger, message);
                Ok(signup_page(&session, user.as_ref(), &form, FormErrors::new())?.into_response())
            }
            None => Err(e.into()),
        },
    }
}

fn login_page(
    session: &Session,
    user: Option<&User>,
    username: &str,
    errors: FormErrors,
) -> Result<Html<String>, AppError> {
    render(LoginTemplate {
        page: PageContext::new(session, user),
        username: username.to_owned(),
        errors,
    })
}

/// GET /login
async fn login_form(
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    login_page(&session, user.as_ref(), "", FormErrors::new())
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok(login_page(&session, user.as_ref(), &form.username, errors)?.into_response());
        }
    };

    let authenticated = UserRepo::new(state.pool())
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    match authenticated {
        Some(found) => {
            tracing::info!(user_id = found.id, "login");
            session.login(found.id);
            session.flash(FlashCategory::Success, format!("Hello, {}!", found.username));
            Ok(Redirect::to("/").into_response())
        }
        None => {
            tracing::info!(username = %credentials.username, "failed login");
            session.flash(FlashCategory::Danger, "Invalid credentials.");
            Ok(login_page(&session, user.as_ref(), &form.username, FormErrors::new())?.into_response())
        }
    }
}

/// GET /logout
async fn logout(session: Session) -> Redirect {
    session.logout();
    session.flash(FlashCategory::Success, "Logout successful");
    Redirect::to("/login")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

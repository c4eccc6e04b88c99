//! Repository implementations for database access
//!
//! Each repository borrows the pool and exposes one method per query.
//! Unique violations surface as `DbError::Conflict` instead of raw sqlx
//! errors so handlers can turn them into form feedback.

pub mod users;
pub mod messages;
pub mod follows;
pub mod likes;

pub use users::{User, UserRepo, UserStats};
pub use messages::{Message, MessageRepo, MessageWithAuthor};
pub use follows::FollowRepo;
pub use likes::LikeRepo;

use crate::auth::PasswordError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A unique constraint rejected the write
    #[error("conflict on {constraint}")]
    Conflict { constraint: String },

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl DbError {
    /// Human-readable reason for a conflict on the users table.
    pub fn conflict_message(&self) -> Option<&'static str> {
        match self {
            Self::Conflict { constraint } if constraint.contains("email") => {
                Some("Email already taken")
            }
            Self::Conflict { .. } => Some("Username already taken"),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return Self::Conflict {
                    constraint: db.constraint().unwrap_or("unique").to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

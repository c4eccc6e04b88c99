//! Message repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use super::DbError;
use crate::models::{MessageText, Pagination, Paginated};

/// Message record from database
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
}

/// Message joined with the fields of its author that pages display
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithAuthor {
    pub id: i32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
    pub username: String,
    pub image_url: String,
}

const WITH_AUTHOR: &str = r#"
    SELECT m.id, m.text, m.timestamp, m.user_id, u.username, u.image_url
    FROM messages m
    JOIN users u ON u.id = m.user_id
"#;

/// Message repository
pub struct MessageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i32, text: &MessageText) -> Result<Message, DbError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (text, user_id)
            VALUES ($1, $2)
            RETURNING id, text, timestamp, user_id
            "#,
        )
        .bind(text.as_str())
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(message_id = message.id, user_id, "message posted");
        Ok(message)
    }

    pub async fn find(&self, id: i32) -> Result<Option<MessageWithAuthor>, DbError> {
        let message = sqlx::query_as::<_, MessageWithAuthor>(&format!("{WITH_AUTHOR} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(message)
    }

    pub async fn get(&self, id: i32) -> Result<MessageWithAuthor, DbError> {
        self.find(id).await?.ok_or_else(|| DbError::NotFound {
            resource: "message",
            id: id.to_string(),
        })
    }

    /// A user's own messages, newest first.
    pub async fn for_user(&self, user_id: i32, limit: u32) -> Result<Vec<MessageWithAuthor>, DbError> {
        let messages = sqlx::query_as::<_, MessageWithAuthor>(&format!(
            "{WITH_AUTHOR} WHERE m.user_id = $1 ORDER BY m.timestamp DESC, m.id DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }

    /// Home timeline: messages from the user and everyone they follow, newest first.
    pub async fn timeline(&self, user_id: i32, page: Pagination) -> Result<Paginated<MessageWithAuthor>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.text, m.timestamp, m.user_id, u.username, u.image_url,
                   COUNT(*) OVER() AS total
            FROM messages m
            JOIN users u ON u.id = m.user_id
            WHERE m.user_id = $1
               OR m.user_id IN (
                   SELECT user_being_followed_id FROM follows WHERE user_following_id = $1
               )
            ORDER BY m.timestamp DESC, m.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .iter()
            .map(MessageWithAuthor::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Delete a message only if `user_id` wrote it. Returns whether a row went.
    pub async fn delete_owned(&self, id: i32, user_id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

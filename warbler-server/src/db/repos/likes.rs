//! Message likes

use std::collections::HashSet;

use sqlx::PgPool;

use super::{DbError, MessageWithAuthor};

/// Like repository
pub struct LikeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LikeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Like a message. Liking twice is a no-op; returns whether a row was added.
    pub async fn like(&self, user_id: i32, message_id: i32) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, message_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, message_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(message_id)
        .execute(self.pool)
        .await?;

        tracing::debug!(user_id, message_id, "like");
        Ok(result.rows_affected() > 0)
    }

    pub async fn unlike(&self, user_id: i32, message_id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND message_id = $2")
            .bind(user_id)
            .bind(message_id)
            .execute(self.pool)
            .await?;

        tracing::debug!(user_id, message_id, "unlike");
        Ok(result.rows_affected() > 0)
    }

    /// Ids of the messages `user_id` liked, for rendering stars.
    pub async fn liked_ids(&self, user_id: i32) -> Result<HashSet<i32>, DbError> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT message_id FROM likes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Messages `user_id` liked, newest like first.
    pub async fn liked_messages(&self, user_id: i32) -> Result<Vec<MessageWithAuthor>, DbError> {
        let messages = sqlx::query_as::<_, MessageWithAuthor>(
            r#"
            SELECT m.id, m.text, m.timestamp, m.user_id, u.username, u.image_url
            FROM likes l
            JOIN messages m ON m.id = l.message_id
            JOIN users u ON u.id = m.user_id
            WHERE l.user_id = $1
            ORDER BY l.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }
}

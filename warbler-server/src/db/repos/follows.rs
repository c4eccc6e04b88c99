//! Follow relationships

use std::collections::HashSet;

use sqlx::PgPool;

use super::{DbError, User};

/// Follow repository
pub struct FollowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FollowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// `follower` starts following `followed`. Idempotent.
    ///
    /// Returns `NotFound` when `followed` does not exist.
    pub async fn follow(&self, follower: i32, followed: i32) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (user_being_followed_id, user_following_id)
            SELECT id, $2 FROM users WHERE id = $1
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(followed)
        .bind(follower)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 && !self.is_following(follower, followed).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: followed.to_string(),
            });
        }

        tracing::info!(follower, followed, "follow");
        Ok(())
    }

    /// Returns whether a follow existed.
    pub async fn unfollow(&self, follower: i32, followed: i32) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM follows WHERE user_being_followed_id = $1 AND user_following_id = $2",
        )
        .bind(followed)
        .bind(follower)
        .execute(self.pool)
        .await?;

        tracing::info!(follower, followed, "unfollow");
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(&self, follower: i32, followed: i32) -> Result<bool, DbError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE user_being_followed_id = $1 AND user_following_id = $2
            )
            "#,
        )
        .bind(followed)
        .bind(follower)
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Whether `other` follows `user_id`.
    pub async fn is_followed_by(&self, user_id: i32, other: i32) -> Result<bool, DbError> {
        self.is_following(other, user_id).await
    }

    /// Users that `user_id` follows.
    pub async fn following(&self, user_id: i32) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.username, u.image_url, u.header_image_url,
                   u.bio, u.location, u.password
            FROM follows f
            JOIN users u ON u.id = f.user_being_followed_id
            WHERE f.user_following_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Users following `user_id`.
    pub async fn followers(&self, user_id: i32) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.username, u.image_url, u.header_image_url,
                   u.bio, u.location, u.password
            FROM follows f
            JOIN users u ON u.id = f.user_following_id
            WHERE f.user_being_followed_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Ids of everyone `user_id` follows, for rendering follow buttons.
    pub async fn following_ids(&self, user_id: i32) -> Result<HashSet<i32>, DbError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT user_being_followed_id FROM follows WHERE user_following_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }
}

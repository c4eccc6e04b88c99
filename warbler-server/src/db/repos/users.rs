//! User repository: signup, authentication, directory and profile edits

use std::fmt;

use sqlx::{FromRow, PgPool, Row};

use super::{escape_like, DbError};
use crate::auth::{hash_password, verify_password};
use crate::forms::{NewUser, ProfileEdit};
use crate::models::{Pagination, Paginated, DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL};

const USER_COLUMNS: &str =
    "id, email, username, image_url, header_image_url, bio, location, password";

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Argon2 PHC hash
    pub password: String,
}

impl User {
    /// Check a plain-text password against this user's hash.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

/// Counters shown on profile pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct UserStats {
    pub messages: i64,
    pub following: i64,
    pub followers: i64,
    pub likes: i64,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Hash the password and insert a new user.
    ///
    /// Duplicate usernames or emails return `DbError::Conflict`.
    pub async fn signup(&self, new: &NewUser) -> Result<User, DbError> {
        let hash = hash_password(&new.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new.username)
        .bind(&new.email)
        .bind(&hash)
        .bind(new.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL))
        .fetch_one(self.pool)
        .await?;

        tracing::info!(user_id = user.id, username = %user.username, "user signed up");
        Ok(user)
    }

    /// Find a user by username and check the password.
    ///
    /// Unknown usernames and wrong passwords both return `Ok(None)`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, DbError> {
        let user = self.find_by_username(username).await?;
        Ok(user.filter(|u| u.check_password(password)))
    }

    pub async fn find(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        self.find(id).await?.ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// List users, optionally filtered by a username substring.
    pub async fn list(&self, search: Option<&str>, page: Pagination) -> Result<Paginated<User>, DbError> {
        let pattern = search.map(|s| format!("%{}%", escape_like(s)));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}, COUNT(*) OVER() AS total
            FROM users
            WHERE $1::text IS NULL OR username ILIKE $1
            ORDER BY username ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .iter()
            .map(User::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Message, following, follower and like counts in one query.
    pub async fn stats(&self, id: i32) -> Result<UserStats, DbError> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM messages WHERE user_id = $1) AS messages,
                (SELECT COUNT(*) FROM follows WHERE user_following_id = $1) AS following,
                (SELECT COUNT(*) FROM follows WHERE user_being_followed_id = $1) AS followers,
                (SELECT COUNT(*) FROM likes WHERE user_id = $1) AS likes
            "#,
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;
        Ok(stats)
    }

    /// Apply a profile edit.
    ///
    /// Blank email, bio and location keep their stored values; blank image
    /// fields go back to the defaults. The password check is the caller's.
    pub async fn update_profile(&self, id: i32, edit: &ProfileEdit) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                username = $2,
                email = COALESCE($3, email),
                image_url = $4,
                header_image_url = $5,
                bio = COALESCE($6, bio),
                location = COALESCE($7, location)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&edit.username)
        .bind(edit.email.as_deref())
        .bind(edit.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL))
        .bind(edit.header_image_url.as_deref().unwrap_or(DEFAULT_HEADER_IMAGE_URL))
        .bind(edit.bio.as_deref())
        .bind(edit.location.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })?;

        tracing::info!(user_id = id, "profile updated");
        Ok(user)
    }

    /// Delete a user. Messages, follows and likes go with it.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        tracing::info!(user_id = id, "user deleted");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "test@test.com".into(),
            username: "testuser".into(),
            image_url: DEFAULT_IMAGE_URL.into(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.into(),
            bio: None,
            location: None,
            password: hash_password("HASHED_PASSWORD").unwrap(),
        }
    }

    #[test]
    fn display_matches_repr() {
        assert_eq!(user().to_string(), "<User #7: testuser, test@test.com>");
    }

    #[test]
    fn check_password() {
        let u = user();
        assert!(u.check_password("HASHED_PASSWORD"));
        assert!(!u.check_password("hashed_password"));
    }
}

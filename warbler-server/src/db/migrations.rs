//! Schema creation for the four Warbler tables

use sqlx::PgPool;

/// Create all tables and indexes if they don't exist.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL UNIQUE,
            image_url TEXT NOT NULL DEFAULT '/static/images/default-pic.svg',
            header_image_url TEXT NOT NULL DEFAULT '/static/images/warbler-hero.svg',
            bio TEXT,
            location TEXT,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id SERIAL PRIMARY KEY,
            text VARCHAR(140) NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            user_being_followed_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            user_following_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (user_being_followed_id, user_following_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS likes (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            message_id INTEGER NOT NULL REFERENCES messages(id) ON DELETE CASCADE,
            UNIQUE (user_id, message_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_user ON messages(user_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_timestamp ON messages(timestamp DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_follows_following ON follows(user_following_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_likes_message ON likes(message_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Drop every table and recreate the schema. Destroys all data.
pub async fn reset(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping all tables");

    sqlx::query("DROP TABLE IF EXISTS likes, follows, messages, users CASCADE")
        .execute(pool)
        .await?;

    run(pool).await
}

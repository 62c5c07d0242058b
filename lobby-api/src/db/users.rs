//! User queries

use lobby_common::db::models::User;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert a new user, returning its guid
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    display_name: &str,
    password_hash: &str,
    password_salt: &str,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO users (guid, username, display_name, password_hash, password_salt)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(username)
    .bind(display_name)
    .bind(password_hash)
    .bind(password_salt)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT guid, username, display_name, password_hash, password_salt, created_at
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await
}

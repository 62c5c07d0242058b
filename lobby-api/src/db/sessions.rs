//! Session queries
//!
//! Tokens are stored only as SHA-256 hashes; the raw token never touches the
//! database.

use sqlx::SqlitePool;

/// Create a session row for a user
pub async fn insert_session(
    pool: &SqlitePool,
    token_hash: &str,
    user_id: &str,
    ttl_seconds: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sessions (token_hash, user_id, expires_at)
         VALUES (?, ?, datetime('now', '+' || ? || ' seconds'))",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(ttl_seconds)
    .execute(pool)
    .await?;

    Ok(())
}

/// Resolve a token hash to a user guid, ignoring expired sessions
pub async fn resolve_session(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT user_id FROM sessions
         WHERE token_hash = ? AND expires_at > datetime('now')",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

/// Delete a session (logout)
pub async fn delete_session(pool: &SqlitePool, token_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(())
}

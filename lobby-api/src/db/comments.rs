//! Comment queries

use lobby_common::db::models::Comment;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn insert_comment(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
    body: &str,
    sentiment: f64,
    sentiment_label: &str,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO comments (guid, campaign_id, user_id, body, sentiment, sentiment_label)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(user_id)
    .bind(body)
    .bind(sentiment)
    .bind(sentiment_label)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn get_comment(
    pool: &SqlitePool,
    comment_id: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT guid, campaign_id, user_id, body, sentiment, sentiment_label, created_at
         FROM comments WHERE guid = ?",
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_comments(pool: &SqlitePool, campaign_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE campaign_id = ?")
        .bind(campaign_id)
        .fetch_one(pool)
        .await
}

pub async fn list_comments(
    pool: &SqlitePool,
    campaign_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT guid, campaign_id, user_id, body, sentiment, sentiment_label, created_at
         FROM comments WHERE campaign_id = ?
         ORDER BY created_at DESC
         LIMIT ? OFFSET ?",
    )
    .bind(campaign_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn delete_comment(pool: &SqlitePool, comment_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE guid = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(())
}

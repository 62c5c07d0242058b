//! Creator poll queries

use lobby_common::db::models::CreatorPoll;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn insert_poll(
    pool: &SqlitePool,
    campaign_id: &str,
    question: &str,
    options_json: &str,
    closes_at: Option<chrono::NaiveDateTime>,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO creator_polls (guid, campaign_id, question, options, closes_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(question)
    .bind(options_json)
    .bind(closes_at)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn get_poll(pool: &SqlitePool, poll_id: &str) -> Result<Option<CreatorPoll>, sqlx::Error> {
    sqlx::query_as::<_, CreatorPoll>(
        "SELECT guid, campaign_id, question, options, closes_at, created_at
         FROM creator_polls WHERE guid = ?",
    )
    .bind(poll_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_polls(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<CreatorPoll>, sqlx::Error> {
    sqlx::query_as::<_, CreatorPoll>(
        "SELECT guid, campaign_id, question, options, closes_at, created_at
         FROM creator_polls WHERE campaign_id = ?
         ORDER BY created_at DESC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Record a vote; the (poll_id, user_id) primary key rejects double voting
pub async fn insert_vote(
    pool: &SqlitePool,
    poll_id: &str,
    user_id: &str,
    option_index: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO poll_votes (poll_id, user_id, option_index) VALUES (?, ?, ?)")
        .bind(poll_id)
        .bind(user_id)
        .bind(option_index)
        .execute(pool)
        .await?;

    Ok(())
}

/// Vote counts per option index
pub async fn vote_counts(pool: &SqlitePool, poll_id: &str) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT option_index, COUNT(*) FROM poll_votes
         WHERE poll_id = ?
         GROUP BY option_index
         ORDER BY option_index",
    )
    .bind(poll_id)
    .fetch_all(pool)
    .await
}

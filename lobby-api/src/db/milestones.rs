//! Milestone queries

use lobby_common::db::models::Milestone;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn insert_milestone(
    pool: &SqlitePool,
    campaign_id: &str,
    label: &str,
    threshold: i64,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO milestones (guid, campaign_id, label, threshold)
         VALUES (?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(label)
    .bind(threshold)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn list_milestones(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "SELECT guid, campaign_id, label, threshold, reached_at, created_at
         FROM milestones WHERE campaign_id = ?
         ORDER BY threshold ASC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Unreached milestones whose threshold the pledge count has crossed
pub async fn crossed_milestones(
    pool: &SqlitePool,
    campaign_id: &str,
    pledge_count: i64,
) -> Result<Vec<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "SELECT guid, campaign_id, label, threshold, reached_at, created_at
         FROM milestones
         WHERE campaign_id = ? AND reached_at IS NULL AND threshold <= ?
         ORDER BY threshold ASC",
    )
    .bind(campaign_id)
    .bind(pledge_count)
    .fetch_all(pool)
    .await
}

/// Stamp reached_at exactly once; returns true when this call did the stamping
pub async fn mark_reached(pool: &SqlitePool, milestone_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE milestones SET reached_at = CURRENT_TIMESTAMP
         WHERE guid = ? AND reached_at IS NULL",
    )
    .bind(milestone_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

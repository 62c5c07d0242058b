//! Pledge queries

use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Pledge row joined with supporter username for list and export views
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PledgeWithUser {
    pub guid: String,
    pub user_id: String,
    pub username: String,
    pub amount_cents: i64,
    pub note: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Insert a pledge; the UNIQUE (campaign_id, user_id) constraint rejects a
/// second lobby from the same supporter
pub async fn insert_pledge(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
    amount_cents: i64,
    note: Option<&str>,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO pledges (guid, campaign_id, user_id, amount_cents, note)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(user_id)
    .bind(amount_cents)
    .bind(note)
    .execute(pool)
    .await?;

    Ok(guid)
}

/// Remove a user's pledge; returns true when a row was deleted
pub async fn delete_pledge(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pledges WHERE campaign_id = ? AND user_id = ?")
        .bind(campaign_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_pledges(pool: &SqlitePool, campaign_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM pledges WHERE campaign_id = ?")
        .bind(campaign_id)
        .fetch_one(pool)
        .await
}

/// List supporters for a campaign, newest first
pub async fn list_pledges(
    pool: &SqlitePool,
    campaign_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<PledgeWithUser>, sqlx::Error> {
    sqlx::query_as::<_, PledgeWithUser>(
        "SELECT p.guid, p.user_id, u.username, p.amount_cents, p.note, p.created_at
         FROM pledges p JOIN users u ON u.guid = p.user_id
         WHERE p.campaign_id = ?
         ORDER BY p.created_at DESC
         LIMIT ? OFFSET ?",
    )
    .bind(campaign_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// All supporters for a campaign, oldest first (CSV export)
pub async fn all_pledges(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<PledgeWithUser>, sqlx::Error> {
    sqlx::query_as::<_, PledgeWithUser>(
        "SELECT p.guid, p.user_id, u.username, p.amount_cents, p.note, p.created_at
         FROM pledges p JOIN users u ON u.guid = p.user_id
         WHERE p.campaign_id = ?
         ORDER BY p.created_at ASC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Platform-wide supporter counts for the retention metric
///
/// Returns (returning_supporters, total_supporters) where a returning
/// supporter has pledged to more than one campaign.
pub async fn retention_counts(pool: &SqlitePool) -> Result<(i64, i64), sqlx::Error> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM
                (SELECT user_id FROM pledges GROUP BY user_id HAVING COUNT(DISTINCT campaign_id) > 1)),
            (SELECT COUNT(DISTINCT user_id) FROM pledges)",
    )
    .fetch_one(pool)
    .await?;

    Ok(row)
}

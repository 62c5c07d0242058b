//! Contribution event queries (activity feed)

use lobby_common::db::models::ContributionEvent;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Record a contribution event
pub async fn insert_event(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: Option<&str>,
    event_type: &str,
    detail: Option<&serde_json::Value>,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO contribution_events (guid, campaign_id, user_id, event_type, detail)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(user_id)
    .bind(event_type)
    .bind(detail.map(|d| d.to_string()))
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn count_events(
    pool: &SqlitePool,
    campaign_id: Option<&str>,
) -> Result<i64, sqlx::Error> {
    match campaign_id {
        Some(id) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM contribution_events WHERE campaign_id = ?")
                .bind(id)
                .fetch_one(pool)
                .await
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM contribution_events")
                .fetch_one(pool)
                .await
        }
    }
}

/// Feed page, newest first; campaign_id = None gives the global feed
pub async fn list_events(
    pool: &SqlitePool,
    campaign_id: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ContributionEvent>, sqlx::Error> {
    match campaign_id {
        Some(id) => {
            sqlx::query_as::<_, ContributionEvent>(
                "SELECT guid, campaign_id, user_id, event_type, detail, created_at
                 FROM contribution_events WHERE campaign_id = ?
                 ORDER BY created_at DESC, guid DESC
                 LIMIT ? OFFSET ?",
            )
            .bind(id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, ContributionEvent>(
                "SELECT guid, campaign_id, user_id, event_type, detail, created_at
                 FROM contribution_events
                 ORDER BY created_at DESC, guid DESC
                 LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

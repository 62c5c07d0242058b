//! Cached signal score queries

use lobby_common::db::models::SignalScoreRow;
use sqlx::SqlitePool;

/// Upsert the cached score for a campaign
pub async fn upsert_score(
    pool: &SqlitePool,
    campaign_id: &str,
    score: f64,
    tier: &str,
    factors_json: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO signal_scores (campaign_id, score, tier, factors, computed_at)
         VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
         ON CONFLICT (campaign_id) DO UPDATE SET
            score = excluded.score,
            tier = excluded.tier,
            factors = excluded.factors,
            computed_at = excluded.computed_at",
    )
    .bind(campaign_id)
    .bind(score)
    .bind(tier)
    .bind(factors_json)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_score(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<SignalScoreRow>, sqlx::Error> {
    sqlx::query_as::<_, SignalScoreRow>(
        "SELECT campaign_id, score, tier, factors, computed_at
         FROM signal_scores WHERE campaign_id = ?",
    )
    .bind(campaign_id)
    .fetch_optional(pool)
    .await
}

/// Age of the cached score in seconds, None when no cache row exists
pub async fn score_age_seconds(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT CAST(strftime('%s', 'now') AS INTEGER) - CAST(strftime('%s', computed_at) AS INTEGER)
         FROM signal_scores WHERE campaign_id = ?",
    )
    .bind(campaign_id)
    .fetch_optional(pool)
    .await
}

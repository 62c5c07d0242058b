//! Campaign team queries

use serde::Serialize;
use sqlx::SqlitePool;

/// Team member row joined with username
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TeamMemberWithUser {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub joined_at: chrono::NaiveDateTime,
}

/// Add a team member; replaces the role if already a member
pub async fn upsert_member(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
    role: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO team_members (campaign_id, user_id, role) VALUES (?, ?, ?)
         ON CONFLICT (campaign_id, user_id) DO UPDATE SET role = excluded.role",
    )
    .bind(campaign_id)
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await?;

    Ok(())
}

/// Role of a user on a campaign's team, if any
pub async fn member_role(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT role FROM team_members WHERE campaign_id = ? AND user_id = ?")
        .bind(campaign_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_members(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<TeamMemberWithUser>, sqlx::Error> {
    sqlx::query_as::<_, TeamMemberWithUser>(
        "SELECT t.user_id, u.username, t.role, t.joined_at
         FROM team_members t JOIN users u ON u.guid = t.user_id
         WHERE t.campaign_id = ?
         ORDER BY t.joined_at ASC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Remove a member; returns true when a row was deleted
pub async fn remove_member(
    pool: &SqlitePool,
    campaign_id: &str,
    user_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team_members WHERE campaign_id = ? AND user_id = ?")
        .bind(campaign_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

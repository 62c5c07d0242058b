//! Campaign queries

use lobby_common::db::models::Campaign;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Campaign row enriched with derived counts for list views
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CampaignSummary {
    pub guid: String,
    pub creator_id: String,
    pub title: String,
    pub slug: String,
    pub brand_name: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub pledge_goal: i64,
    pub pledge_count: i64,
    pub signal_score: f64,
    pub created_at: chrono::NaiveDateTime,
}

/// Filters and ordering for campaign listing
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sort: CampaignSort,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignSort {
    #[default]
    CreatedAt,
    PledgeCount,
    SignalScore,
}

impl CampaignSort {
    /// Parse from query-string value; unknown values fall back to created_at
    pub fn parse(value: &str) -> Self {
        match value {
            "pledge_count" => CampaignSort::PledgeCount,
            "signal_score" => CampaignSort::SignalScore,
            _ => CampaignSort::CreatedAt,
        }
    }

    fn order_column(&self) -> &'static str {
        match self {
            CampaignSort::CreatedAt => "c.created_at",
            CampaignSort::PledgeCount => "pledge_count",
            CampaignSort::SignalScore => "signal_score",
        }
    }
}

const SUMMARY_SELECT: &str = "SELECT c.guid, c.creator_id, c.title, c.slug, c.brand_name, \
     c.category, c.description, c.status, c.pledge_goal, \
     (SELECT COUNT(*) FROM pledges p WHERE p.campaign_id = c.guid) AS pledge_count, \
     COALESCE((SELECT s.score FROM signal_scores s WHERE s.campaign_id = c.guid), 0.0) AS signal_score, \
     c.created_at \
     FROM campaigns c";

fn filter_clause(filter: &CampaignFilter) -> String {
    let mut clauses = Vec::new();
    if filter.status.is_some() {
        clauses.push("c.status = ?");
    }
    if filter.category.is_some() {
        clauses.push("c.category = ?");
    }
    if filter.brand.is_some() {
        clauses.push("c.brand_name = ?");
    }
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// Count campaigns matching a filter
pub async fn count_campaigns(
    pool: &SqlitePool,
    filter: &CampaignFilter,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM campaigns c{}", filter_clause(filter));
    let mut query = sqlx::query_scalar(&sql);
    for value in [&filter.status, &filter.category, &filter.brand]
        .into_iter()
        .flatten()
    {
        query = query.bind(value.clone());
    }
    query.fetch_one(pool).await
}

/// List campaigns matching a filter, sorted and paginated
pub async fn list_campaigns(
    pool: &SqlitePool,
    filter: &CampaignFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<CampaignSummary>, sqlx::Error> {
    let direction = if filter.descending { "DESC" } else { "ASC" };
    let sql = format!(
        "{}{} ORDER BY {} {} LIMIT ? OFFSET ?",
        SUMMARY_SELECT,
        filter_clause(filter),
        filter.sort.order_column(),
        direction,
    );

    let mut query = sqlx::query_as::<_, CampaignSummary>(&sql);
    for value in [&filter.status, &filter.category, &filter.brand]
        .into_iter()
        .flatten()
    {
        query = query.bind(value.clone());
    }
    query.bind(limit).bind(offset).fetch_all(pool).await
}

/// Insert a campaign, returning its guid
pub async fn insert_campaign(
    pool: &SqlitePool,
    creator_id: &str,
    title: &str,
    slug: &str,
    brand_name: &str,
    category: &str,
    description: &str,
    pledge_goal: i64,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO campaigns (guid, creator_id, title, slug, brand_name, category, description, pledge_goal)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(creator_id)
    .bind(title)
    .bind(slug)
    .bind(brand_name)
    .bind(category)
    .bind(description)
    .bind(pledge_goal)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn get_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        "SELECT guid, creator_id, title, slug, brand_name, category, description,
                status, pledge_goal, created_at, updated_at
         FROM campaigns WHERE guid = ?",
    )
    .bind(campaign_id)
    .fetch_optional(pool)
    .await
}

pub async fn slug_exists(pool: &SqlitePool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM campaigns WHERE slug = ?)")
        .bind(slug)
        .fetch_one(pool)
        .await
}

/// Patch mutable campaign fields; None leaves a field unchanged
pub async fn update_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
    pledge_goal: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE campaigns SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            category = COALESCE(?, category),
            status = COALESCE(?, status),
            pledge_goal = COALESCE(?, pledge_goal),
            updated_at = CURRENT_TIMESTAMP
         WHERE guid = ?",
    )
    .bind(title)
    .bind(description)
    .bind(category)
    .bind(status)
    .bind(pledge_goal)
    .bind(campaign_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_campaign(pool: &SqlitePool, campaign_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM campaigns WHERE guid = ?")
        .bind(campaign_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Aggregate counts feeding the signal score and weather calculators
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignAggregates {
    pub pledge_count: i64,
    pub pledge_goal: i64,
    pub unique_commenters: i64,
    pub team_size: i64,
    pub survey_response_count: i64,
    pub poll_vote_count: i64,
    pub pledges_last_7_days: i64,
    pub pledges_prior_7_days: i64,
}

/// Gather the aggregates for one campaign in a single query
pub async fn campaign_aggregates(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<CampaignAggregates>, sqlx::Error> {
    let row: Option<(i64, i64, i64, i64, i64, i64, i64, i64)> = sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM pledges p WHERE p.campaign_id = c.guid),
            c.pledge_goal,
            (SELECT COUNT(DISTINCT user_id) FROM comments cm WHERE cm.campaign_id = c.guid),
            (SELECT COUNT(*) FROM team_members t WHERE t.campaign_id = c.guid),
            (SELECT COUNT(*) FROM survey_responses sr
                JOIN surveys s ON s.guid = sr.survey_id WHERE s.campaign_id = c.guid),
            (SELECT COUNT(*) FROM poll_votes v
                JOIN creator_polls pl ON pl.guid = v.poll_id WHERE pl.campaign_id = c.guid),
            (SELECT COUNT(*) FROM pledges p WHERE p.campaign_id = c.guid
                AND p.created_at >= datetime('now', '-7 days')),
            (SELECT COUNT(*) FROM pledges p WHERE p.campaign_id = c.guid
                AND p.created_at >= datetime('now', '-14 days')
                AND p.created_at < datetime('now', '-7 days'))
         FROM campaigns c WHERE c.guid = ?",
    )
    .bind(campaign_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(
        |(
            pledge_count,
            pledge_goal,
            unique_commenters,
            team_size,
            survey_response_count,
            poll_vote_count,
            pledges_last_7_days,
            pledges_prior_7_days,
        )| CampaignAggregates {
            pledge_count,
            pledge_goal,
            unique_commenters,
            team_size,
            survey_response_count,
            poll_vote_count,
            pledges_last_7_days,
            pledges_prior_7_days,
        },
    ))
}

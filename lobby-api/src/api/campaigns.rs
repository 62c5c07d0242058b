//! Campaign endpoints

use crate::api::auth::CurrentUser;
use crate::api::teams::require_role;
use crate::db::{campaigns, events, milestones};
use crate::error::{ApiError, Result};
use crate::pagination::calculate_pagination;
use crate::services::score_refresh;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use lobby_common::db::models::Campaign;
use lobby_common::events::LobbyEvent;
use lobby_common::scoring::weather;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_page() -> i64 {
    1
}

fn default_order() -> String {
    "desc".to_string()
}

#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub campaigns: Vec<campaigns::CampaignSummary>,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneSpec {
    pub label: String,
    pub threshold: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub title: String,
    pub brand_name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub pledge_goal: i64,
    #[serde(default)]
    pub milestones: Vec<MilestoneSpec>,
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateCampaignRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub pledge_goal: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateCampaignResponse {
    pub campaign_id: Uuid,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct SignalResponse {
    pub campaign_id: String,
    pub score: f64,
    pub tier: String,
    pub factors: lobby_common::scoring::signal::SignalFactors,
    pub computed_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub campaign_id: String,
    pub weather: String,
    pub summary: String,
    pub signal_score: f64,
    pub momentum_ratio: f64,
}

const VALID_STATUSES: &[&str] = &["draft", "active", "delivered", "closed"];

// ============================================================================
// Helpers
// ============================================================================

/// Derive a URL slug from a title: lowercase, non-alphanumeric runs become
/// single hyphens
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Load a campaign or 404
pub async fn load_campaign(state: &AppState, campaign_id: &str) -> Result<Campaign> {
    campaigns::get_campaign(&state.db, campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Campaign not found: {}", campaign_id)))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/campaigns
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CampaignListResponse>> {
    let filter = campaigns::CampaignFilter {
        status: query.status,
        category: query.category,
        brand: query.brand,
        sort: query
            .sort
            .as_deref()
            .map(campaigns::CampaignSort::parse)
            .unwrap_or_default(),
        descending: query.order.to_lowercase() != "asc",
    };

    let total = campaigns::count_campaigns(&state.db, &filter).await?;
    let pagination = calculate_pagination(
        total,
        query.page,
        query.per_page.unwrap_or(state.list_page_size),
    );

    let rows =
        campaigns::list_campaigns(&state.db, &filter, pagination.per_page, pagination.offset)
            .await?;

    Ok(Json(CampaignListResponse {
        total,
        page: pagination.page,
        per_page: pagination.per_page,
        total_pages: pagination.total_pages,
        campaigns: rows,
    }))
}

/// POST /api/campaigns
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<Json<CreateCampaignResponse>> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }
    if req.brand_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Brand name must not be empty".to_string()));
    }
    if req.pledge_goal <= 0 {
        return Err(ApiError::BadRequest("Pledge goal must be positive".to_string()));
    }
    for m in &req.milestones {
        if m.threshold <= 0 {
            return Err(ApiError::BadRequest(
                "Milestone thresholds must be positive".to_string(),
            ));
        }
    }

    // Disambiguate the slug if the title is already taken
    let mut slug = slugify(&req.title);
    if slug.is_empty() || campaigns::slug_exists(&state.db, &slug).await? {
        slug = format!("{}-{}", slug, &Uuid::new_v4().to_string()[..8]);
    }

    let campaign_id = campaigns::insert_campaign(
        &state.db,
        &user.guid,
        req.title.trim(),
        &slug,
        req.brand_name.trim(),
        &req.category,
        &req.description,
        req.pledge_goal,
    )
    .await?;

    // The creator owns the campaign team
    crate::db::teams::upsert_member(&state.db, &campaign_id.to_string(), &user.guid, "owner")
        .await?;

    for m in &req.milestones {
        milestones::insert_milestone(&state.db, &campaign_id.to_string(), &m.label, m.threshold)
            .await?;
    }

    events::insert_event(
        &state.db,
        &campaign_id.to_string(),
        Some(&user.guid),
        "campaign_created",
        Some(&serde_json::json!({ "title": req.title, "brand_name": req.brand_name })),
    )
    .await?;

    state.broadcast_event(LobbyEvent::CampaignCreated {
        campaign_id,
        title: req.title.clone(),
        brand_name: req.brand_name.clone(),
        timestamp: chrono::Utc::now(),
    });

    info!("Campaign '{}' created for brand '{}'", req.title, req.brand_name);

    Ok(Json(CreateCampaignResponse { campaign_id, slug }))
}

/// GET /api/campaigns/:id
pub async fn get(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Campaign>> {
    Ok(Json(load_campaign(&state, &campaign_id).await?))
}

/// PATCH /api/campaigns/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner", "organizer"]).await?;

    if let Some(status) = &req.status {
        if !VALID_STATUSES.contains(&status.as_str()) {
            return Err(ApiError::BadRequest(format!("Invalid status: {}", status)));
        }
    }
    if let Some(goal) = req.pledge_goal {
        if goal <= 0 {
            return Err(ApiError::BadRequest("Pledge goal must be positive".to_string()));
        }
    }
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("Title must not be empty".to_string()));
        }
    }

    campaigns::update_campaign(
        &state.db,
        &campaign_id,
        req.title.as_deref(),
        req.description.as_deref(),
        req.category.as_deref(),
        req.status.as_deref(),
        req.pledge_goal,
    )
    .await?;

    // Goal changes shift the goal-progress factor
    if req.pledge_goal.is_some() {
        score_refresh::schedule_refresh(state.clone(), campaign_id.clone());
    }

    Ok(Json(load_campaign(&state, &campaign_id).await?))
}

/// DELETE /api/campaigns/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner"]).await?;

    campaigns::delete_campaign(&state.db, &campaign_id).await?;
    info!("Campaign {} deleted", campaign_id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// GET /api/campaigns/:id/signal
pub async fn signal(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<SignalResponse>> {
    load_campaign(&state, &campaign_id).await?;
    let score = score_refresh::fresh_signal_score(&state, &campaign_id).await?;

    // The cache row was just written or validated as fresh
    let computed_at = crate::db::scores::get_score(&state.db, &campaign_id)
        .await?
        .map(|row| row.computed_at);

    Ok(Json(SignalResponse {
        campaign_id,
        score: score.score,
        tier: score.tier.as_str().to_string(),
        factors: score.factors,
        computed_at,
    }))
}

/// GET /api/campaigns/:id/weather
pub async fn weather_report(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<WeatherResponse>> {
    load_campaign(&state, &campaign_id).await?;

    let aggregates = campaigns::campaign_aggregates(&state.db, &campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Campaign not found: {}", campaign_id)))?;

    let score = score_refresh::fresh_signal_score(&state, &campaign_id).await?;
    let ratio = weather::momentum_ratio(
        aggregates.pledges_last_7_days,
        aggregates.pledges_prior_7_days,
    );
    let condition = weather::demand_weather(score.score, ratio);

    Ok(Json(WeatherResponse {
        campaign_id,
        weather: condition.as_str().to_string(),
        summary: condition.summary().to_string(),
        signal_score: score.score,
        momentum_ratio: ratio,
    }))
}

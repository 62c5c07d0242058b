//! Pledge (lobby support) endpoints

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::db::{events, milestones, pledges};
use crate::error::{ApiError, Result};
use crate::pagination::calculate_pagination;
use crate::services::score_refresh;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use lobby_common::events::LobbyEvent;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePledgeRequest {
    #[serde(default)]
    pub amount_cents: i64,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePledgeResponse {
    pub pledge_id: Uuid,
    pub pledge_count: i64,
    pub milestones_reached: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PledgeListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub per_page: Option<i64>,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct PledgeListResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub pledges: Vec<pledges::PledgeWithUser>,
}

/// Duplicate-pledge detection: SQLite reports UNIQUE violations as database
/// errors with a constraint message
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed"))
}

/// POST /api/campaigns/:id/pledges
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CreatePledgeRequest>,
) -> Result<Json<CreatePledgeResponse>> {
    let campaign = load_campaign(&state, &campaign_id).await?;

    if campaign.status != "active" {
        return Err(ApiError::BadRequest(format!(
            "Campaign is not accepting pledges (status: {})",
            campaign.status
        )));
    }
    if req.amount_cents < 0 {
        return Err(ApiError::BadRequest("Amount must not be negative".to_string()));
    }

    let pledge_id = pledges::insert_pledge(
        &state.db,
        &campaign_id,
        &user.guid,
        req.amount_cents,
        req.note.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("You have already pledged to this campaign".to_string())
        } else {
            ApiError::Database(e)
        }
    })?;

    let pledge_count = pledges::count_pledges(&state.db, &campaign_id).await?;

    events::insert_event(
        &state.db,
        &campaign_id,
        Some(&user.guid),
        "pledge_added",
        Some(&serde_json::json!({ "pledge_count": pledge_count })),
    )
    .await?;

    if let Ok(campaign_uuid) = Uuid::parse_str(&campaign_id) {
        state.broadcast_event(LobbyEvent::PledgeAdded {
            campaign_id: campaign_uuid,
            pledge_count,
            timestamp: chrono::Utc::now(),
        });
    }

    // Stamp any milestones this pledge crossed
    let mut milestones_reached = Vec::new();
    for milestone in milestones::crossed_milestones(&state.db, &campaign_id, pledge_count).await? {
        if milestones::mark_reached(&state.db, &milestone.guid).await? {
            info!(
                "Campaign {} reached milestone '{}' ({} pledges)",
                campaign_id, milestone.label, milestone.threshold
            );

            events::insert_event(
                &state.db,
                &campaign_id,
                None,
                "milestone_reached",
                Some(&serde_json::json!({
                    "label": milestone.label,
                    "threshold": milestone.threshold,
                })),
            )
            .await?;

            if let (Ok(campaign_uuid), Ok(milestone_uuid)) = (
                Uuid::parse_str(&campaign_id),
                Uuid::parse_str(&milestone.guid),
            ) {
                state.broadcast_event(LobbyEvent::MilestoneReached {
                    campaign_id: campaign_uuid,
                    milestone_id: milestone_uuid,
                    label: milestone.label.clone(),
                    threshold: milestone.threshold,
                    timestamp: chrono::Utc::now(),
                });
            }

            milestones_reached.push(milestone.label);
        }
    }

    score_refresh::schedule_refresh(state.clone(), campaign_id.clone());

    Ok(Json(CreatePledgeResponse {
        pledge_id,
        pledge_count,
        milestones_reached,
    }))
}

/// DELETE /api/campaigns/:id/pledges - withdraw own pledge
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    load_campaign(&state, &campaign_id).await?;

    let removed = pledges::delete_pledge(&state.db, &campaign_id, &user.guid).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "You have no pledge on this campaign".to_string(),
        ));
    }

    let pledge_count = pledges::count_pledges(&state.db, &campaign_id).await?;

    events::insert_event(
        &state.db,
        &campaign_id,
        Some(&user.guid),
        "pledge_removed",
        Some(&serde_json::json!({ "pledge_count": pledge_count })),
    )
    .await?;

    if let Ok(campaign_uuid) = Uuid::parse_str(&campaign_id) {
        state.broadcast_event(LobbyEvent::PledgeRemoved {
            campaign_id: campaign_uuid,
            pledge_count,
            timestamp: chrono::Utc::now(),
        });
    }

    score_refresh::schedule_refresh(state.clone(), campaign_id.clone());

    Ok(Json(serde_json::json!({
        "status": "withdrawn",
        "pledge_count": pledge_count,
    })))
}

/// GET /api/campaigns/:id/pledges
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(query): Query<PledgeListQuery>,
) -> Result<Json<PledgeListResponse>> {
    load_campaign(&state, &campaign_id).await?;

    let total = pledges::count_pledges(&state.db, &campaign_id).await?;
    let pagination = calculate_pagination(
        total,
        query.page,
        query.per_page.unwrap_or(state.list_page_size),
    );

    let rows = pledges::list_pledges(
        &state.db,
        &campaign_id,
        pagination.per_page,
        pagination.offset,
    )
    .await?;

    Ok(Json(PledgeListResponse {
        total,
        page: pagination.page,
        per_page: pagination.per_page,
        total_pages: pagination.total_pages,
        pledges: rows,
    }))
}

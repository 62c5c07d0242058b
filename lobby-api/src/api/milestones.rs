//! Milestone endpoints

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::api::teams::require_role;
use crate::db::milestones;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use lobby_common::db::models::Milestone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateMilestoneRequest {
    pub label: String,
    pub threshold: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateMilestoneResponse {
    pub milestone_id: Uuid,
}

/// GET /api/campaigns/:id/milestones
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Vec<Milestone>>> {
    load_campaign(&state, &campaign_id).await?;
    Ok(Json(milestones::list_milestones(&state.db, &campaign_id).await?))
}

/// POST /api/campaigns/:id/milestones
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CreateMilestoneRequest>,
) -> Result<Json<CreateMilestoneResponse>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner", "organizer"]).await?;

    if req.label.trim().is_empty() {
        return Err(ApiError::BadRequest("Label must not be empty".to_string()));
    }
    if req.threshold <= 0 {
        return Err(ApiError::BadRequest("Threshold must be positive".to_string()));
    }

    let milestone_id =
        milestones::insert_milestone(&state.db, &campaign_id, req.label.trim(), req.threshold)
            .await
            .map_err(|e| {
                if matches!(&e, sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed"))
                {
                    ApiError::Conflict(format!(
                        "A milestone with threshold {} already exists",
                        req.threshold
                    ))
                } else {
                    ApiError::Database(e)
                }
            })?;

    Ok(Json(CreateMilestoneResponse { milestone_id }))
}

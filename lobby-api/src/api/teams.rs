//! Campaign team endpoints

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::db::{events, teams, users};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

const VALID_ROLES: &[&str] = &["organizer", "supporter"];

/// Verify the user holds one of the allowed roles on the campaign's team
pub async fn require_role(
    state: &AppState,
    campaign_id: &str,
    user_id: &str,
    allowed: &[&str],
) -> Result<()> {
    let role = teams::member_role(&state.db, campaign_id, user_id).await?;

    match role {
        Some(role) if allowed.contains(&role.as_str()) => Ok(()),
        _ => Err(ApiError::Forbidden(format!(
            "Requires one of roles: {}",
            allowed.join(", ")
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "supporter".to_string()
}

/// GET /api/campaigns/:id/team
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Vec<teams::TeamMemberWithUser>>> {
    load_campaign(&state, &campaign_id).await?;
    Ok(Json(teams::list_members(&state.db, &campaign_id).await?))
}

/// POST /api/campaigns/:id/team
pub async fn add_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<serde_json::Value>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner", "organizer"]).await?;

    // Ownership is assigned at campaign creation and never via this endpoint
    if !VALID_ROLES.contains(&req.role.as_str()) {
        return Err(ApiError::BadRequest(format!("Invalid role: {}", req.role)));
    }

    let member = users::get_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", req.username)))?;

    if teams::member_role(&state.db, &campaign_id, &member.guid).await?.as_deref() == Some("owner")
    {
        return Err(ApiError::BadRequest(
            "The owner's role cannot be changed".to_string(),
        ));
    }

    teams::upsert_member(&state.db, &campaign_id, &member.guid, &req.role).await?;

    events::insert_event(
        &state.db,
        &campaign_id,
        Some(&member.guid),
        "member_joined",
        Some(&serde_json::json!({ "role": req.role })),
    )
    .await?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// DELETE /api/campaigns/:id/team/:user_id
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((campaign_id, member_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner"]).await?;

    if teams::member_role(&state.db, &campaign_id, &member_id).await?.as_deref() == Some("owner") {
        return Err(ApiError::BadRequest(
            "The owner cannot be removed from the team".to_string(),
        ));
    }

    let removed = teams::remove_member(&state.db, &campaign_id, &member_id).await?;
    if !removed {
        return Err(ApiError::NotFound("Not a team member".to_string()));
    }

    Ok(Json(serde_json::json!({ "status": "removed" })))
}

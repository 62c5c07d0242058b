//! Creator poll endpoints

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::api::teams::require_role;
use crate::db::{events, polls};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use lobby_common::db::models::CreatorPoll;
use lobby_common::events::LobbyEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub closes_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct CreatePollResponse {
    pub poll_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option_index: i64,
}

#[derive(Debug, Serialize)]
pub struct PollResultsResponse {
    pub poll_id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Vote count per option, same order as options
    pub counts: Vec<i64>,
    pub total_votes: i64,
}

fn parse_options(poll: &CreatorPoll) -> Result<Vec<String>> {
    serde_json::from_str(&poll.options)
        .map_err(|e| ApiError::Internal(format!("Corrupt poll options: {}", e)))
}

/// POST /api/campaigns/:id/polls
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CreatePollRequest>,
) -> Result<Json<CreatePollResponse>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner", "organizer"]).await?;

    if req.question.trim().is_empty() {
        return Err(ApiError::BadRequest("Question must not be empty".to_string()));
    }
    if req.options.len() < 2 {
        return Err(ApiError::BadRequest(
            "A poll needs at least two options".to_string(),
        ));
    }

    let options_json = serde_json::to_string(&req.options)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize options: {}", e)))?;

    let poll_id = polls::insert_poll(
        &state.db,
        &campaign_id,
        req.question.trim(),
        &options_json,
        req.closes_at,
    )
    .await?;

    events::insert_event(
        &state.db,
        &campaign_id,
        Some(&user.guid),
        "poll_created",
        Some(&serde_json::json!({ "question": req.question })),
    )
    .await?;

    if let Ok(campaign_uuid) = Uuid::parse_str(&campaign_id) {
        state.broadcast_event(LobbyEvent::PollCreated {
            campaign_id: campaign_uuid,
            poll_id,
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(CreatePollResponse { poll_id }))
}

/// GET /api/campaigns/:id/polls
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Vec<CreatorPoll>>> {
    load_campaign(&state, &campaign_id).await?;
    Ok(Json(polls::list_polls(&state.db, &campaign_id).await?))
}

/// POST /api/polls/:id/votes
pub async fn vote(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(poll_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<serde_json::Value>> {
    let poll = polls::get_poll(&state.db, &poll_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Poll not found: {}", poll_id)))?;

    if let Some(closes_at) = poll.closes_at {
        if chrono::Utc::now().naive_utc() >= closes_at {
            return Err(ApiError::BadRequest("Poll is closed".to_string()));
        }
    }

    let options = parse_options(&poll)?;
    if req.option_index < 0 || req.option_index as usize >= options.len() {
        return Err(ApiError::BadRequest(format!(
            "Option index out of range: {}",
            req.option_index
        )));
    }

    polls::insert_vote(&state.db, &poll_id, &user.guid, req.option_index)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed"))
            {
                ApiError::Conflict("You have already voted in this poll".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

    events::insert_event(
        &state.db,
        &poll.campaign_id,
        Some(&user.guid),
        "poll_vote",
        None,
    )
    .await?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// GET /api/polls/:id/results
pub async fn results(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
) -> Result<Json<PollResultsResponse>> {
    let poll = polls::get_poll(&state.db, &poll_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Poll not found: {}", poll_id)))?;

    let options = parse_options(&poll)?;
    let mut counts = vec![0i64; options.len()];
    let mut total_votes = 0i64;

    for (option_index, count) in polls::vote_counts(&state.db, &poll_id).await? {
        if let Some(slot) = counts.get_mut(option_index as usize) {
            *slot = count;
        }
        total_votes += count;
    }

    Ok(Json(PollResultsResponse {
        poll_id,
        question: poll.question,
        options,
        counts,
        total_votes,
    }))
}

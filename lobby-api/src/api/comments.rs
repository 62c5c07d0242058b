//! Comment endpoints
//!
//! Sentiment is computed once at insert time and stored with the row.

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::db::{comments, events, teams};
use crate::error::{ApiError, Result};
use crate::pagination::calculate_pagination;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use lobby_common::db::models::Comment;
use lobby_common::events::LobbyEvent;
use lobby_common::scoring::analyze_sentiment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCommentResponse {
    pub comment_id: Uuid,
    pub sentiment: f64,
    pub sentiment_label: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub per_page: Option<i64>,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub comments: Vec<Comment>,
}

/// POST /api/campaigns/:id/comments
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<CreateCommentResponse>> {
    load_campaign(&state, &campaign_id).await?;

    let body = req.body.trim();
    if body.is_empty() {
        return Err(ApiError::BadRequest("Comment body must not be empty".to_string()));
    }
    if body.len() > 10_000 {
        return Err(ApiError::BadRequest("Comment body too long".to_string()));
    }

    let sentiment = analyze_sentiment(body);

    let comment_id = comments::insert_comment(
        &state.db,
        &campaign_id,
        &user.guid,
        body,
        sentiment.score,
        sentiment.label.as_str(),
    )
    .await?;

    events::insert_event(
        &state.db,
        &campaign_id,
        Some(&user.guid),
        "comment_added",
        Some(&serde_json::json!({ "sentiment_label": sentiment.label.as_str() })),
    )
    .await?;

    if let Ok(campaign_uuid) = Uuid::parse_str(&campaign_id) {
        state.broadcast_event(LobbyEvent::CommentAdded {
            campaign_id: campaign_uuid,
            comment_id,
            sentiment_label: sentiment.label.as_str().to_string(),
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(CreateCommentResponse {
        comment_id,
        sentiment: sentiment.score,
        sentiment_label: sentiment.label.as_str().to_string(),
    }))
}

/// GET /api/campaigns/:id/comments
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(query): Query<CommentListQuery>,
) -> Result<Json<CommentListResponse>> {
    load_campaign(&state, &campaign_id).await?;

    let total = comments::count_comments(&state.db, &campaign_id).await?;
    let pagination = calculate_pagination(
        total,
        query.page,
        query.per_page.unwrap_or(state.list_page_size),
    );

    let rows = comments::list_comments(
        &state.db,
        &campaign_id,
        pagination.per_page,
        pagination.offset,
    )
    .await?;

    Ok(Json(CommentListResponse {
        total,
        page: pagination.page,
        per_page: pagination.per_page,
        total_pages: pagination.total_pages,
        comments: rows,
    }))
}

/// DELETE /api/comments/:id - author or campaign owner
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(comment_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let comment = comments::get_comment(&state.db, &comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Comment not found: {}", comment_id)))?;

    let is_author = comment.user_id == user.guid;
    let is_owner = matches!(
        teams::member_role(&state.db, &comment.campaign_id, &user.guid).await?,
        Some(role) if role == "owner"
    );

    if !is_author && !is_owner {
        return Err(ApiError::Forbidden(
            "Only the author or the campaign owner can delete a comment".to_string(),
        ));
    }

    comments::delete_comment(&state.db, &comment_id).await?;

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

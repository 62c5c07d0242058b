//! Activity feed endpoints

use crate::api::campaigns::load_campaign;
use crate::db::events;
use crate::error::Result;
use crate::pagination::calculate_pagination;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use lobby_common::db::models::ContributionEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub per_page: Option<i64>,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub events: Vec<ContributionEvent>,
}

async fn feed_page(
    state: &AppState,
    campaign_id: Option<&str>,
    query: &FeedQuery,
) -> Result<FeedResponse> {
    let total = events::count_events(&state.db, campaign_id).await?;
    let pagination = calculate_pagination(
        total,
        query.page,
        query.per_page.unwrap_or(state.feed_page_size),
    );

    let rows = events::list_events(
        &state.db,
        campaign_id,
        pagination.per_page,
        pagination.offset,
    )
    .await?;

    Ok(FeedResponse {
        total,
        page: pagination.page,
        per_page: pagination.per_page,
        total_pages: pagination.total_pages,
        events: rows,
    })
}

/// GET /api/feed - global activity feed, newest first
pub async fn global(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    Ok(Json(feed_page(&state, None, &query).await?))
}

/// GET /api/campaigns/:id/feed
pub async fn campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    load_campaign(&state, &campaign_id).await?;
    Ok(Json(feed_page(&state, Some(&campaign_id), &query).await?))
}

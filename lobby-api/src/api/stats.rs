//! Platform statistics endpoints

use crate::db::pledges;
use crate::error::Result;
use crate::state::AppState;
use axum::{extract::State, Json};
use lobby_common::scoring::retention_percentage;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RetentionResponse {
    pub total_supporters: i64,
    pub returning_supporters: i64,
    pub retention_percentage: f64,
}

/// GET /api/stats/retention
pub async fn retention(State(state): State<AppState>) -> Result<Json<RetentionResponse>> {
    let (returning, total) = pledges::retention_counts(&state.db).await?;

    Ok(Json(RetentionResponse {
        total_supporters: total,
        returning_supporters: returning,
        retention_percentage: retention_percentage(returning, total),
    }))
}

//! Cached signal score refresh
//!
//! Pledge mutations schedule a recompute on a spawned task. The read path
//! tolerates a stale or missing cache row by recomputing synchronously, so
//! the spawned task needs no retry machinery; failures are logged and the
//! next read repairs the cache.

use crate::db::{campaigns, scores};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use lobby_common::events::LobbyEvent;
use lobby_common::scoring::{compute_signal_score, SignalInputs, SignalScore};
use tracing::{debug, error};
use uuid::Uuid;

/// Recompute and cache the signal score for a campaign
///
/// Returns the freshly computed score. Errors if the campaign does not exist.
pub async fn refresh_signal_score(state: &AppState, campaign_id: &str) -> Result<SignalScore> {
    let aggregates = campaigns::campaign_aggregates(&state.db, campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Campaign not found: {}", campaign_id)))?;

    let inputs = SignalInputs {
        pledge_count: aggregates.pledge_count,
        pledge_goal: aggregates.pledge_goal,
        unique_commenters: aggregates.unique_commenters,
        team_size: aggregates.team_size,
        survey_response_count: aggregates.survey_response_count,
        poll_vote_count: aggregates.poll_vote_count,
        pledges_last_7_days: aggregates.pledges_last_7_days,
    };

    let result = compute_signal_score(&inputs);

    let factors_json = serde_json::to_string(&result.factors)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize factors: {}", e)))?;

    scores::upsert_score(
        &state.db,
        campaign_id,
        result.score,
        result.tier.as_str(),
        &factors_json,
    )
    .await?;

    debug!(
        "Signal score refreshed for {}: {:.1} ({})",
        campaign_id,
        result.score,
        result.tier.as_str()
    );

    if let Ok(campaign_uuid) = Uuid::parse_str(campaign_id) {
        state.broadcast_event(LobbyEvent::SignalScoreUpdated {
            campaign_id: campaign_uuid,
            score: result.score,
            tier: result.tier.as_str().to_string(),
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(result)
}

/// Schedule a score refresh without blocking the request
pub fn schedule_refresh(state: AppState, campaign_id: String) {
    tokio::spawn(async move {
        if let Err(e) = refresh_signal_score(&state, &campaign_id).await {
            error!("Background score refresh failed for {}: {}", campaign_id, e);
        }
    });
}

/// Cached score if fresh enough, otherwise recompute
pub async fn fresh_signal_score(state: &AppState, campaign_id: &str) -> Result<SignalScore> {
    let age = scores::score_age_seconds(&state.db, campaign_id).await?;

    if let Some(age) = age {
        if age < state.score_stale_after_seconds {
            if let Some(row) = scores::get_score(&state.db, campaign_id).await? {
                let factors = serde_json::from_str(&row.factors).map_err(|e| {
                    ApiError::Internal(format!("Corrupt cached factors: {}", e))
                })?;
                return Ok(SignalScore {
                    score: row.score,
                    tier: lobby_common::scoring::SignalTier::from_score(row.score),
                    factors,
                });
            }
        }
    }

    refresh_signal_score(state, campaign_id).await
}

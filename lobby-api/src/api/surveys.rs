//! Survey endpoints

use crate::api::auth::CurrentUser;
use crate::api::campaigns::load_campaign;
use crate::api::teams::require_role;
use crate::db::{events, surveys};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use lobby_common::db::models::Survey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSurveyResponse {
    pub survey_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SurveySummaryResponse {
    pub survey_id: String,
    pub title: String,
    pub questions: Vec<String>,
    pub response_count: i64,
    /// Per-question list of all answers given
    pub answers_by_question: Vec<Vec<String>>,
}

/// POST /api/campaigns/:id/surveys
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CreateSurveyRequest>,
) -> Result<Json<CreateSurveyResponse>> {
    load_campaign(&state, &campaign_id).await?;
    require_role(&state, &campaign_id, &user.guid, &["owner", "organizer"]).await?;

    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }
    if req.questions.is_empty() {
        return Err(ApiError::BadRequest(
            "A survey needs at least one question".to_string(),
        ));
    }

    let questions_json = serde_json::to_string(&req.questions)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize questions: {}", e)))?;

    let survey_id =
        surveys::insert_survey(&state.db, &campaign_id, req.title.trim(), &questions_json).await?;

    Ok(Json(CreateSurveyResponse { survey_id }))
}

/// GET /api/campaigns/:id/surveys
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<Vec<Survey>>> {
    load_campaign(&state, &campaign_id).await?;
    Ok(Json(surveys::list_surveys(&state.db, &campaign_id).await?))
}

/// POST /api/surveys/:id/responses
pub async fn respond(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(survey_id): Path<String>,
    Json(req): Json<SubmitResponseRequest>,
) -> Result<Json<serde_json::Value>> {
    let survey = surveys::get_survey(&state.db, &survey_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Survey not found: {}", survey_id)))?;

    let questions: Vec<String> = serde_json::from_str(&survey.questions)
        .map_err(|e| ApiError::Internal(format!("Corrupt survey questions: {}", e)))?;

    if req.answers.len() != questions.len() {
        return Err(ApiError::BadRequest(format!(
            "Expected {} answers, got {}",
            questions.len(),
            req.answers.len()
        )));
    }

    let answers_json = serde_json::to_string(&req.answers)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize answers: {}", e)))?;

    surveys::insert_response(&state.db, &survey_id, &user.guid, &answers_json)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed"))
            {
                ApiError::Conflict("You have already responded to this survey".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

    events::insert_event(
        &state.db,
        &survey.campaign_id,
        Some(&user.guid),
        "survey_response",
        None,
    )
    .await?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// GET /api/surveys/:id/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<Json<SurveySummaryResponse>> {
    let survey = surveys::get_survey(&state.db, &survey_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Survey not found: {}", survey_id)))?;

    let questions: Vec<String> = serde_json::from_str(&survey.questions)
        .map_err(|e| ApiError::Internal(format!("Corrupt survey questions: {}", e)))?;

    let responses = surveys::list_responses(&state.db, &survey_id).await?;
    let mut answers_by_question: Vec<Vec<String>> = vec![Vec::new(); questions.len()];

    for response in &responses {
        // Responses with mismatched arity were rejected at submit time, but a
        // malformed row must not poison the whole summary
        if let Ok(answers) = serde_json::from_str::<Vec<String>>(&response.answers) {
            for (i, answer) in answers.into_iter().enumerate() {
                if let Some(slot) = answers_by_question.get_mut(i) {
                    slot.push(answer);
                }
            }
        }
    }

    Ok(Json(SurveySummaryResponse {
        survey_id,
        title: survey.title,
        questions,
        response_count: responses.len() as i64,
        answers_by_question,
    }))
}

//! Survey queries

use lobby_common::db::models::{Survey, SurveyResponse};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn insert_survey(
    pool: &SqlitePool,
    campaign_id: &str,
    title: &str,
    questions_json: &str,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO surveys (guid, campaign_id, title, questions)
         VALUES (?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(campaign_id)
    .bind(title)
    .bind(questions_json)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn get_survey(pool: &SqlitePool, survey_id: &str) -> Result<Option<Survey>, sqlx::Error> {
    sqlx::query_as::<_, Survey>(
        "SELECT guid, campaign_id, title, questions, created_at
         FROM surveys WHERE guid = ?",
    )
    .bind(survey_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_surveys(pool: &SqlitePool, campaign_id: &str) -> Result<Vec<Survey>, sqlx::Error> {
    sqlx::query_as::<_, Survey>(
        "SELECT guid, campaign_id, title, questions, created_at
         FROM surveys WHERE campaign_id = ?
         ORDER BY created_at DESC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Record a response; the UNIQUE (survey_id, user_id) constraint rejects a
/// second submission
pub async fn insert_response(
    pool: &SqlitePool,
    survey_id: &str,
    user_id: &str,
    answers_json: &str,
) -> Result<Uuid, sqlx::Error> {
    let guid = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO survey_responses (guid, survey_id, user_id, answers)
         VALUES (?, ?, ?, ?)",
    )
    .bind(guid.to_string())
    .bind(survey_id)
    .bind(user_id)
    .bind(answers_json)
    .execute(pool)
    .await?;

    Ok(guid)
}

pub async fn list_responses(
    pool: &SqlitePool,
    survey_id: &str,
) -> Result<Vec<SurveyResponse>, sqlx::Error> {
    sqlx::query_as::<_, SurveyResponse>(
        "SELECT guid, survey_id, user_id, answers, created_at
         FROM survey_responses WHERE survey_id = ?
         ORDER BY created_at ASC",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await
}

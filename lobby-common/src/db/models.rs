//! Database models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campaign {
    pub guid: String,
    pub creator_id: String,
    pub title: String,
    pub slug: String,
    pub brand_name: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub pledge_goal: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pledge {
    pub guid: String,
    pub campaign_id: String,
    pub user_id: String,
    pub amount_cents: i64,
    pub note: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub guid: String,
    pub campaign_id: String,
    pub user_id: String,
    pub body: String,
    pub sentiment: f64,
    pub sentiment_label: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreatorPoll {
    pub guid: String,
    pub campaign_id: String,
    pub question: String,
    /// JSON array of option strings
    pub options: String,
    pub closes_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Survey {
    pub guid: String,
    pub campaign_id: String,
    pub title: String,
    /// JSON array of question strings
    pub questions: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SurveyResponse {
    pub guid: String,
    pub survey_id: String,
    pub user_id: String,
    /// JSON array of answer strings, same arity as the survey's questions
    pub answers: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub campaign_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Milestone {
    pub guid: String,
    pub campaign_id: String,
    pub label: String,
    pub threshold: i64,
    pub reached_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContributionEvent {
    pub guid: String,
    pub campaign_id: String,
    pub user_id: Option<String>,
    pub event_type: String,
    pub detail: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SignalScoreRow {
    pub campaign_id: String,
    pub score: f64,
    pub tier: String,
    /// JSON factor breakdown as computed by the scoring module
    pub factors: String,
    pub computed_at: chrono::NaiveDateTime,
}

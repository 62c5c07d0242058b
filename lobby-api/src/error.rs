//! Error types for lobby-api
//!
//! `ApiError` is returned by every handler and translates uniformly into an
//! HTTP status plus a JSON `{ "error": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Main error type for lobby-api handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid request payload or parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflicting state (e.g. duplicate pledge)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<lobby_common::Error> for ApiError {
    fn from(e: lobby_common::Error) -> Self {
        match e {
            lobby_common::Error::Database(e) => ApiError::Database(e),
            // Io and Config failures are never the client's fault
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience Result type using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

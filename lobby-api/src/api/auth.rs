//! Session-token authentication
//!
//! Register/login issue a random bearer token; only its SHA-256 hash is
//! stored. The middleware resolves the token to a user and attaches a
//! `CurrentUser` extension for protected handlers.

use crate::db::{sessions, users};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// Authenticated user attached to the request by the middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub guid: String,
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub token: String,
}

// ============================================================================
// Hashing helpers
// ============================================================================

/// SHA-256 of salt + password, as 64 hex chars
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of a session token, as 64 hex chars
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    if req.username.len() < 3 {
        return Err(ApiError::BadRequest(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if users::username_exists(&state.db, &req.username).await? {
        return Err(ApiError::Conflict(format!(
            "Username already taken: {}",
            req.username
        )));
    }

    let salt = random_hex(16);
    let password_hash = hash_password(&req.password, &salt);
    let display_name = if req.display_name.is_empty() {
        req.username.clone()
    } else {
        req.display_name.clone()
    };

    let user_id = users::insert_user(
        &state.db,
        &req.username,
        &display_name,
        &password_hash,
        &salt,
    )
    .await?;

    info!("Registered user '{}'", req.username);

    let token = random_hex(32);
    sessions::insert_session(
        &state.db,
        &hash_token(&token),
        &user_id.to_string(),
        state.session_ttl_seconds,
    )
    .await?;

    Ok(Json(AuthResponse {
        user_id: user_id.to_string(),
        token,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = users::get_by_username(&state.db, &req.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    // Seeded users with empty hashes (Anonymous) cannot log in
    if user.password_hash.is_empty()
        || hash_password(&req.password, &user.password_salt) != user.password_hash
    {
        return Err(ApiError::Unauthorized);
    }

    let token = random_hex(32);
    sessions::insert_session(
        &state.db,
        &hash_token(&token),
        &user.guid,
        state.session_ttl_seconds,
    )
    .await?;

    info!("User '{}' logged in", user.username);

    Ok(Json(AuthResponse {
        user_id: user.guid,
        token,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<serde_json::Value>> {
    if let Some(token) = bearer_token(&request) {
        sessions::delete_session(&state.db, &hash_token(&token)).await?;
    }

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

// ============================================================================
// Middleware
// ============================================================================

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

/// Authentication middleware for protected routes
///
/// Resolves the bearer token to a user and attaches `CurrentUser`.
/// Returns 401 when the token is missing, unknown, or expired.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or(ApiError::Unauthorized)?;

    let user_id = sessions::resolve_session(&state.db, &hash_token(&token))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser { guid: user_id });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_deterministic() {
        let a = hash_password("hunter22", "salt");
        let b = hash_password("hunter22", "salt");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_password_hash_varies_with_salt() {
        assert_ne!(
            hash_password("hunter22", "salt-a"),
            hash_password("hunter22", "salt-b")
        );
    }

    #[test]
    fn test_token_hash_is_64_hex_chars() {
        let hash = hash_token("some-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_hex_length_and_uniqueness() {
        let a = random_hex(32);
        let b = random_hex(32);
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}

//! Integration tests for the lobby-api HTTP endpoints
//!
//! Tests cover:
//! - Health and build identification endpoints (no auth required)
//! - Registration, login, and session enforcement
//! - Campaign create/read/update lifecycle and validation
//! - Pledge flow: add, duplicate rejection, withdraw, milestone crossing
//! - Signal score and demand weather endpoints
//! - Comments with stored sentiment
//! - Polls, surveys, and platform retention stats
//! - Supporter CSV export

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use lobby_api::{build_router, AppState};

/// Test helper: fresh database in a temp folder plus a router over it
async fn setup_app() -> (axum::Router, TempDir) {
    let dir = TempDir::new().expect("Should create temp dir");
    let db_path = dir.path().join("productlobby.db");

    let pool = lobby_common::db::init::init_database(&db_path)
        .await
        .expect("Should initialize database");

    let state = AppState::load(pool).await.expect("Should load state");
    (build_router(state), dir)
}

/// Test helper: JSON request builder with optional bearer token
fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// Test helper: bodyless request with optional bearer token
fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: register a user and return (user_id, token)
async fn register_user(app: &axum::Router, username: &str) -> (String, String) {
    let request = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({ "username": username, "password": "correct-horse-battery" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    (
        body["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Test helper: create an active campaign, return its id
async fn create_campaign(app: &axum::Router, token: &str, title: &str, goal: i64) -> String {
    let request = json_request(
        "POST",
        "/api/campaigns",
        Some(token),
        json!({
            "title": title,
            "brand_name": "Acme",
            "category": "snacks",
            "pledge_goal": goal,
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    body["campaign_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["module"], "lobby-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get_request("/build_info", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let (app, _dir) = setup_app().await;

    let (user_id, _token) = register_user(&app, "alice").await;
    assert!(!user_id.is_empty());

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "username": "alice", "password": "correct-horse-battery" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["user_id"], user_id.as_str());
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (app, _dir) = setup_app().await;

    let request = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({ "username": "bob", "password": "short" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let (app, _dir) = setup_app().await;

    register_user(&app, "carol").await;

    let request = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({ "username": "carol", "password": "another-password" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let (app, _dir) = setup_app().await;

    register_user(&app, "dave").await;

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "username": "dave", "password": "not-the-password" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_require_session() {
    let (app, _dir) = setup_app().await;

    let request = json_request(
        "POST",
        "/api/campaigns",
        None,
        json!({ "title": "No auth", "brand_name": "X", "pledge_goal": 10 }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = json_request(
        "POST",
        "/api/campaigns",
        Some("bogus-token"),
        json!({ "title": "Bad token", "brand_name": "X", "pledge_goal": 10 }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Campaigns
// =============================================================================

#[tokio::test]
async fn test_campaign_create_and_get() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "erin").await;

    let request = json_request(
        "POST",
        "/api/campaigns",
        Some(&token),
        json!({
            "title": "Bring Back Crystal Cola",
            "brand_name": "FizzCo",
            "pledge_goal": 500,
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["slug"], "bring-back-crystal-cola");
    let campaign_id = body["campaign_id"].as_str().unwrap().to_string();

    let uri = format!("/api/campaigns/{}", campaign_id);
    let response = app.oneshot(get_request(&uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "Bring Back Crystal Cola");
    assert_eq!(body["brand_name"], "FizzCo");
    assert_eq!(body["status"], "active");
    assert_eq!(body["pledge_goal"], 500);
}

#[tokio::test]
async fn test_campaign_create_rejects_zero_goal() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "frank").await;

    let request = json_request(
        "POST",
        "/api/campaigns",
        Some(&token),
        json!({ "title": "Zero goal", "brand_name": "X", "pledge_goal": 0 }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_campaign_list_pagination_shape() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "gwen").await;

    create_campaign(&app, &token, "Campaign One", 100).await;
    create_campaign(&app, &token, "Campaign Two", 100).await;

    let response = app
        .oneshot(get_request("/api/campaigns?page=1&per_page=1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["per_page"], 1);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["campaigns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_campaign_update_requires_team_role() {
    let (app, _dir) = setup_app().await;
    let (_id, owner_token) = register_user(&app, "hank").await;
    let (_id2, outsider_token) = register_user(&app, "iris").await;

    let campaign_id = create_campaign(&app, &owner_token, "Team Only", 100).await;
    let uri = format!("/api/campaigns/{}", campaign_id);

    // A non-member cannot update
    let request = json_request(
        "PATCH",
        &uri,
        Some(&outsider_token),
        json!({ "status": "closed" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner can
    let request = json_request(
        "PATCH",
        &uri,
        Some(&owner_token),
        json!({ "status": "closed" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "closed");
}

#[tokio::test]
async fn test_unknown_campaign_returns_404() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get_request("/api/campaigns/no-such-campaign", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

// =============================================================================
// Pledges and Milestones
// =============================================================================

#[tokio::test]
async fn test_pledge_flow_with_duplicate_and_withdraw() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "jane").await;
    let (_id2, supporter) = register_user(&app, "kyle").await;

    let campaign_id = create_campaign(&app, &creator, "Pledge Flow", 100).await;
    let uri = format!("/api/campaigns/{}/pledges", campaign_id);

    let request = json_request("POST", &uri, Some(&supporter), json!({ "amount_cents": 500 }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["pledge_count"], 1);

    // Second pledge from the same user is rejected
    let request = json_request("POST", &uri, Some(&supporter), json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Withdraw
    let request = json_request("DELETE", &uri, Some(&supporter), json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["pledge_count"], 0);

    // Withdrawing again finds nothing
    let request = json_request("DELETE", &uri, Some(&supporter), json!({}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pledge_crosses_milestone() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "lena").await;

    let request = json_request(
        "POST",
        "/api/campaigns",
        Some(&creator),
        json!({
            "title": "Milestone Crossing",
            "brand_name": "Acme",
            "pledge_goal": 100,
            "milestones": [{ "label": "First supporter", "threshold": 1 }],
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let campaign_id = body["campaign_id"].as_str().unwrap().to_string();

    let uri = format!("/api/campaigns/{}/pledges", campaign_id);
    let request = json_request("POST", &uri, Some(&creator), json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["milestones_reached"], json!(["First supporter"]));

    // The milestone is stamped as reached
    let uri = format!("/api/campaigns/{}/milestones", campaign_id);
    let response = app.oneshot(get_request(&uri, None)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body[0]["reached_at"].is_string());
}

#[tokio::test]
async fn test_pledges_rejected_on_closed_campaign() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "mona").await;

    let campaign_id = create_campaign(&app, &creator, "Closing Soon", 100).await;

    let uri = format!("/api/campaigns/{}", campaign_id);
    let request = json_request("PATCH", &uri, Some(&creator), json!({ "status": "closed" }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/campaigns/{}/pledges", campaign_id);
    let request = json_request("POST", &uri, Some(&creator), json!({}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Signal Score and Weather
// =============================================================================

#[tokio::test]
async fn test_signal_score_reflects_pledges() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "nora").await;

    // Baseline campaign: only the owner team row contributes
    let quiet = create_campaign(&app, &creator, "Signal Quiet", 10).await;
    let quiet_uri = format!("/api/campaigns/{}/signal", quiet);

    let response = app
        .clone()
        .oneshot(get_request(&quiet_uri, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let baseline = body["score"].as_f64().unwrap();
    assert_eq!(body["tier"], "emerging");
    assert_eq!(body["factors"]["goal_progress"], 0.0);

    // Pledged campaign: goal progress and momentum lift the score
    let busy = create_campaign(&app, &creator, "Signal Busy", 10).await;
    let uri = format!("/api/campaigns/{}/pledges", busy);
    let request = json_request("POST", &uri, Some(&creator), json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let busy_uri = format!("/api/campaigns/{}/signal", busy);
    let response = app.oneshot(get_request(&busy_uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert!(body["score"].as_f64().unwrap() > baseline);
    assert!(body["factors"]["goal_progress"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_weather_endpoint_shape() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "omar").await;

    let campaign_id = create_campaign(&app, &creator, "Weather Check", 100).await;
    let uri = format!("/api/campaigns/{}/weather", campaign_id);

    let response = app.oneshot(get_request(&uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["weather"].is_string());
    assert!(body["summary"].is_string());
    assert!(body["momentum_ratio"].is_number());
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn test_comment_stores_sentiment() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "pia").await;

    let campaign_id = create_campaign(&app, &token, "Comment Check", 100).await;
    let uri = format!("/api/campaigns/{}/comments", campaign_id);

    let request = json_request(
        "POST",
        &uri,
        Some(&token),
        json!({ "body": "I love this, amazing idea, please make it" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["sentiment_label"], "positive");
    assert!(body["sentiment"].as_f64().unwrap() > 0.0);

    let response = app.oneshot(get_request(&uri, None)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["comments"][0]["sentiment_label"], "positive");
}

#[tokio::test]
async fn test_empty_comment_rejected() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "quinn").await;

    let campaign_id = create_campaign(&app, &token, "Empty Comment", 100).await;
    let uri = format!("/api/campaigns/{}/comments", campaign_id);

    let request = json_request("POST", &uri, Some(&token), json!({ "body": "   " }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Polls
// =============================================================================

#[tokio::test]
async fn test_poll_create_vote_and_results() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "rosa").await;
    let (_id2, voter) = register_user(&app, "sam").await;

    let campaign_id = create_campaign(&app, &creator, "Poll Check", 100).await;
    let uri = format!("/api/campaigns/{}/polls", campaign_id);

    // One option is not a poll
    let request = json_request(
        "POST",
        &uri,
        Some(&creator),
        json!({ "question": "Which flavor?", "options": ["Mango"] }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request(
        "POST",
        &uri,
        Some(&creator),
        json!({ "question": "Which flavor?", "options": ["Mango", "Lime"] }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let poll_id = body["poll_id"].as_str().unwrap().to_string();

    // Out-of-range option index
    let vote_uri = format!("/api/polls/{}/votes", poll_id);
    let request = json_request("POST", &vote_uri, Some(&voter), json!({ "option_index": 5 }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request("POST", &vote_uri, Some(&voter), json!({ "option_index": 1 }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Double voting conflicts
    let request = json_request("POST", &vote_uri, Some(&voter), json!({ "option_index": 0 }));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let results_uri = format!("/api/polls/{}/results", poll_id);
    let response = app.oneshot(get_request(&results_uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["counts"], json!([0, 1]));
    assert_eq!(body["total_votes"], 1);
}

#[tokio::test]
async fn test_poll_creation_requires_team_role() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "tess").await;
    let (_id2, outsider) = register_user(&app, "uma").await;

    let campaign_id = create_campaign(&app, &creator, "Poll Auth", 100).await;
    let uri = format!("/api/campaigns/{}/polls", campaign_id);

    let request = json_request(
        "POST",
        &uri,
        Some(&outsider),
        json!({ "question": "Allowed?", "options": ["Yes", "No"] }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_vote_rejected_after_poll_closes() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "ivan").await;

    let campaign_id = create_campaign(&app, &creator, "Closed Poll", 100).await;
    let uri = format!("/api/campaigns/{}/polls", campaign_id);

    let request = json_request(
        "POST",
        &uri,
        Some(&creator),
        json!({
            "question": "Too late?",
            "options": ["Yes", "No"],
            "closes_at": "2020-01-01T00:00:00",
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let poll_id = body["poll_id"].as_str().unwrap().to_string();

    let vote_uri = format!("/api/polls/{}/votes", poll_id);
    let request = json_request("POST", &vote_uri, Some(&creator), json!({ "option_index": 0 }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Poll is closed");
}

// =============================================================================
// Surveys
// =============================================================================

#[tokio::test]
async fn test_survey_respond_and_summary() {
    let (app, _dir) = setup_app().await;
    let (_id, creator) = register_user(&app, "vera").await;

    let campaign_id = create_campaign(&app, &creator, "Survey Check", 100).await;
    let uri = format!("/api/campaigns/{}/surveys", campaign_id);

    let request = json_request(
        "POST",
        &uri,
        Some(&creator),
        json!({
            "title": "Flavor research",
            "questions": ["Favorite flavor?", "How often would you buy?"],
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let survey_id = body["survey_id"].as_str().unwrap().to_string();

    // Wrong answer count
    let respond_uri = format!("/api/surveys/{}/responses", survey_id);
    let request = json_request(
        "POST",
        &respond_uri,
        Some(&creator),
        json!({ "answers": ["Mango"] }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request(
        "POST",
        &respond_uri,
        Some(&creator),
        json!({ "answers": ["Mango", "Weekly"] }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summary_uri = format!("/api/surveys/{}/summary", survey_id);
    let response = app.oneshot(get_request(&summary_uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["response_count"], 1);
    assert_eq!(body["answers_by_question"], json!([["Mango"], ["Weekly"]]));
}

// =============================================================================
// Teams
// =============================================================================

#[tokio::test]
async fn test_team_add_and_remove_member() {
    let (app, _dir) = setup_app().await;
    let (_id, owner) = register_user(&app, "walt").await;
    let (helper_id, _helper_token) = register_user(&app, "xena").await;

    let campaign_id = create_campaign(&app, &owner, "Team Check", 100).await;
    let uri = format!("/api/campaigns/{}/team", campaign_id);

    let request = json_request(
        "POST",
        &uri,
        Some(&owner),
        json!({ "username": "xena", "role": "organizer" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, None)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 2);

    let remove_uri = format!("/api/campaigns/{}/team/{}", campaign_id, helper_id);
    let request = json_request("DELETE", &remove_uri, Some(&owner), json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request(&uri, None)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// =============================================================================
// Feed, Stats, and Export
// =============================================================================

#[tokio::test]
async fn test_feed_records_activity() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "yuri").await;

    let campaign_id = create_campaign(&app, &token, "Feed Check", 100).await;

    let uri = format!("/api/campaigns/{}/pledges", campaign_id);
    let request = json_request("POST", &uri, Some(&token), json!({}));
    app.clone().oneshot(request).await.unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/api/feed", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 2); // campaign_created + pledge_added
    let kinds: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"campaign_created"));
    assert!(kinds.contains(&"pledge_added"));

    let campaign_feed = format!("/api/campaigns/{}/feed", campaign_id);
    let response = app.oneshot(get_request(&campaign_feed, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_retention_stats() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "zoe").await;

    // No pledges yet: retention is zero, not an error
    let response = app
        .clone()
        .oneshot(get_request("/api/stats/retention", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_supporters"], 0);
    assert_eq!(body["retention_percentage"], 0.0);

    // One supporter on two campaigns counts as returning
    let first = create_campaign(&app, &token, "Retention One", 100).await;
    let second = create_campaign(&app, &token, "Retention Two", 100).await;
    for campaign_id in [&first, &second] {
        let uri = format!("/api/campaigns/{}/pledges", campaign_id);
        let request = json_request("POST", &uri, Some(&token), json!({}));
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_request("/api/stats/retention", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_supporters"], 1);
    assert_eq!(body["returning_supporters"], 1);
    assert_eq!(body["retention_percentage"], 100.0);
}

#[tokio::test]
async fn test_supporter_csv_export() {
    let (app, _dir) = setup_app().await;
    let (_id, token) = register_user(&app, "abe").await;

    let campaign_id = create_campaign(&app, &token, "Export Check", 100).await;

    let uri = format!("/api/campaigns/{}/pledges", campaign_id);
    let request = json_request(
        "POST",
        &uri,
        Some(&token),
        json!({ "amount_cents": 1500, "note": "take my money" }),
    );
    app.clone().oneshot(request).await.unwrap();

    let export_uri = format!("/api/campaigns/{}/export/supporters", campaign_id);
    let response = app.oneshot(get_request(&export_uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("username,amount_cents,note,pledged_at"));
    let row = lines.next().expect("Should have a data row");
    assert!(row.starts_with("abe,1500,take my money,"));
}

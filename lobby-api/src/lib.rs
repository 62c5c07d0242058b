//! lobby-api library - ProductLobby HTTP API service
//!
//! Serves the campaign, pledge, discussion, research, and scoring
//! endpoints over JSON, plus a server-sent event stream of platform
//! activity.

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;
pub mod services;
pub mod state;

pub use state::AppState;

/// Build application router
///
/// Read endpoints and authentication entry points are public; every
/// mutating endpoint requires a bearer session token.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, patch, post};

    // Protected routes (require a valid session)
    let protected = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/campaigns", post(api::campaigns::create))
        .route("/api/campaigns/:campaign_id", patch(api::campaigns::update))
        .route(
            "/api/campaigns/:campaign_id",
            delete(api::campaigns::delete),
        )
        .route(
            "/api/campaigns/:campaign_id/pledges",
            post(api::pledges::create),
        )
        .route(
            "/api/campaigns/:campaign_id/pledges",
            delete(api::pledges::withdraw),
        )
        .route(
            "/api/campaigns/:campaign_id/comments",
            post(api::comments::create),
        )
        .route("/api/comments/:comment_id", delete(api::comments::delete))
        .route("/api/campaigns/:campaign_id/polls", post(api::polls::create))
        .route("/api/polls/:poll_id/votes", post(api::polls::vote))
        .route(
            "/api/campaigns/:campaign_id/surveys",
            post(api::surveys::create),
        )
        .route(
            "/api/surveys/:survey_id/responses",
            post(api::surveys::respond),
        )
        .route("/api/campaigns/:campaign_id/team", post(api::teams::add_member))
        .route(
            "/api/campaigns/:campaign_id/team/:member_id",
            delete(api::teams::remove_member),
        )
        .route(
            "/api/campaigns/:campaign_id/milestones",
            post(api::milestones::create),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/health", get(api::health::health))
        .route("/build_info", get(api::health::build_info))
        .route("/events", get(api::sse::event_stream))
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/campaigns", get(api::campaigns::list))
        .route("/api/campaigns/:campaign_id", get(api::campaigns::get))
        .route(
            "/api/campaigns/:campaign_id/signal",
            get(api::campaigns::signal),
        )
        .route(
            "/api/campaigns/:campaign_id/weather",
            get(api::campaigns::weather_report),
        )
        .route(
            "/api/campaigns/:campaign_id/pledges",
            get(api::pledges::list),
        )
        .route(
            "/api/campaigns/:campaign_id/comments",
            get(api::comments::list),
        )
        .route("/api/campaigns/:campaign_id/polls", get(api::polls::list))
        .route("/api/polls/:poll_id/results", get(api::polls::results))
        .route(
            "/api/campaigns/:campaign_id/surveys",
            get(api::surveys::list),
        )
        .route("/api/surveys/:survey_id/summary", get(api::surveys::summary))
        .route("/api/campaigns/:campaign_id/team", get(api::teams::list))
        .route(
            "/api/campaigns/:campaign_id/milestones",
            get(api::milestones::list),
        )
        .route(
            "/api/campaigns/:campaign_id/export/supporters",
            get(api::exports::supporters_csv),
        )
        .route("/api/campaigns/:campaign_id/feed", get(api::feed::campaign))
        .route("/api/feed", get(api::feed::global))
        .route("/api/stats/retention", get(api::stats::retention));

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

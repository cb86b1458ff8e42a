//! HTTP API for the sensory state engine.
//!
//! Routes:
//! - `GET  /health` - service health check
//! - `POST /api/v1/sensory/analyze` - classify sound/light/touch levels
//! - `POST /api/v1/sensory/risk` - assess trigger risk for a context
//! - `POST /api/v1/sensory/risk/activity` - forecast risk for an activity
//! - `GET  /api/v1/sensory/sessions/:user_id/environment` - current settings
//! - `PUT  /api/v1/sensory/sessions/:user_id/environment` - manual override
//! - `PUT  /api/v1/sensory/sessions/:user_id/preferences` - set preferences
//! - `GET  /api/v1/sensory/sessions/:user_id/summary` - session summary

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use dto::{
    ActivityForecastRequest, AnalyzeRequest, AnalyzeResponse, EnvironmentResponse, HealthResponse,
    ManualAdjustmentRequest, ManualAdjustmentResponse, PreferencesRequest, RiskRequest,
};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};

/// Build the API router with all routes wired to `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/sensory/analyze", post(handlers::analyze))
        .route("/api/v1/sensory/risk", post(handlers::assess_risk))
        .route("/api/v1/sensory/risk/activity", post(handlers::forecast_activity))
        .route(
            "/api/v1/sensory/sessions/:user_id/environment",
            get(handlers::get_environment).put(handlers::adjust_environment),
        )
        .route(
            "/api/v1/sensory/sessions/:user_id/preferences",
            put(handlers::set_preferences),
        )
        .route(
            "/api/v1/sensory/sessions/:user_id/summary",
            get(handlers::session_summary),
        )
        .with_state(state)
}

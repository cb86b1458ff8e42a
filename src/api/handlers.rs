//! Axum request handlers for the sensory API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::classify::SensoryLevels;
use crate::domain::{RiskAssessment, TriggerForecast};
use crate::environment::SettingKey;
use crate::{SessionSummary, VERSION};

/// Health check endpoint for monitoring.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "sensory-state-engine",
        version: VERSION,
        timestamp: Utc::now(),
    })
}

/// Classify sensory input levels.
///
/// Accepts `{sound_level, light_level, touch_level, user_id?}` with every
/// level an integer in 0-100, and returns the classified state, score,
/// recommendation, and caregiver alert level. Out-of-range levels are
/// rejected with 422 before any computation.
#[tracing::instrument(skip(state))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let levels = SensoryLevels::new(
        request.sound_level as f64,
        request.light_level as f64,
        request.touch_level as f64,
    )?;

    let analysis = state.classifier().analyze(levels);

    let mut individual_scores = HashMap::new();
    individual_scores.insert("sound_level".to_string(), request.sound_level);
    individual_scores.insert("light_level".to_string(), request.light_level);
    individual_scores.insert("touch_level".to_string(), request.touch_level);

    Ok(Json(AnalyzeResponse {
        sensory_state: analysis.state,
        sensory_score: (analysis.score * 10.0).round() / 10.0,
        individual_scores,
        recommendation: analysis.recommendation,
        alert_level: analysis.alert_level,
    }))
}

/// Assess trigger risk for a context record.
#[tracing::instrument(skip(state))]
pub async fn assess_risk(
    State(state): State<AppState>,
    Json(request): Json<RiskRequest>,
) -> ApiResult<Json<RiskAssessment>> {
    if !(0.0..=1.0).contains(&request.context.sensory_load) {
        return Err(ApiError::validation(
            "sensory_load must be between 0 and 1",
            Some("sensory_load".to_string()),
        ));
    }
    if request.context.hour > 23 {
        return Err(ApiError::validation(
            "hour must be between 0 and 23",
            Some("hour".to_string()),
        ));
    }

    let assessment = state.with_estimator(|estimator| estimator.assess_risk(&request.context));
    Ok(Json(assessment))
}

/// Forecast trigger likelihood for an upcoming activity description.
#[tracing::instrument(skip(state))]
pub async fn forecast_activity(
    State(state): State<AppState>,
    Json(request): Json<ActivityForecastRequest>,
) -> ApiResult<Json<TriggerForecast>> {
    if request.activity.trim().is_empty() {
        return Err(ApiError::validation(
            "activity description must not be empty",
            Some("activity".to_string()),
        ));
    }

    let forecast = state.with_estimator(|estimator| {
        estimator.predict_trigger_likelihood(&request.activity, &request.context)
    });
    Ok(Json(forecast))
}

/// Current environment settings for a user's session.
#[tracing::instrument(skip(state))]
pub async fn get_environment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<EnvironmentResponse>> {
    state
        .with_existing_session(&user_id, |session| EnvironmentResponse {
            settings: session.current_settings(),
        })
        .map(Json)
        .ok_or(ApiError::SessionNotFound { user_id })
}

/// Manually override one environment setting.
///
/// Unknown setting names are rejected with 400; values are clamped to
/// [0, 1] and the old and new values are returned.
#[tracing::instrument(skip(state))]
pub async fn adjust_environment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ManualAdjustmentRequest>,
) -> ApiResult<Json<ManualAdjustmentResponse>> {
    let setting: SettingKey = request.setting.parse()?;

    let adjustment =
        state.with_session(&user_id, |session| session.manual_adjustment(setting, request.value))?;

    Ok(Json(ManualAdjustmentResponse {
        setting: adjustment.setting.to_string(),
        old_value: adjustment.old_value,
        new_value: adjustment.new_value,
        timestamp: adjustment.timestamp,
    }))
}

/// Replace a user's environment preferences.
#[tracing::instrument(skip(state))]
pub async fn set_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<PreferencesRequest>,
) -> ApiResult<Json<EnvironmentResponse>> {
    let mut preferences = HashMap::new();
    for (name, value) in &request.preferences {
        let key: SettingKey = name.parse()?;
        preferences.insert(key, *value);
    }

    let settings = state.with_session(&user_id, |session| {
        session.set_preferences(preferences);
        session.current_settings()
    });

    Ok(Json(EnvironmentResponse { settings }))
}

/// Session summary for caregiver display.
#[tracing::instrument(skip(state))]
pub async fn session_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<SessionSummary>> {
    state
        .with_existing_session(&user_id, |session| session.summary())
        .map(Json)
        .ok_or(ApiError::SessionNotFound { user_id })
}

//! Data Transfer Objects for the sensory REST API.
//!
//! Wire field names are part of the interoperability contract with existing
//! caregiver collaborators and must not change: `sensory_state`,
//! `sensory_score`, `individual_scores`, `recommendation`, `alert_level`,
//! and the hyphenated `under-stimulated` state name.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AlertLevel, RiskContext, SensoryState};
use crate::environment::EnvironmentSettings;

/// Request body for sensory state classification.
///
/// All levels are integers on the 0-100 scale:
///
/// ```json
/// {
///   "sound_level": 45,
///   "light_level": 60,
///   "touch_level": 35,
///   "user_id": "user_001"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzeRequest {
    /// Sound level intensity (0-100)
    pub sound_level: i64,
    /// Light level intensity (0-100)
    pub light_level: i64,
    /// Touch sensitivity level (0-100)
    pub touch_level: i64,
    /// Optional user identifier for personalization
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body for sensory state classification.
///
/// ```json
/// {
///   "sensory_state": "calm",
///   "sensory_score": 46.7,
///   "individual_scores": {
///     "sound_level": 45,
///     "light_level": 60,
///     "touch_level": 35
///   },
///   "recommendation": "Current sensory environment is comfortable. ...",
///   "alert_level": "low"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzeResponse {
    /// Classified state
    pub sensory_state: SensoryState,
    /// Mean score, rounded to one decimal
    pub sensory_score: f64,
    /// Echo of the classified input levels
    pub individual_scores: HashMap<String, i64>,
    /// Caregiver-facing recommendation
    pub recommendation: String,
    /// Caregiver alert level
    pub alert_level: AlertLevel,
}

/// Request body for a context risk assessment. See [`RiskContext`] for the
/// factor semantics; all fields default when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskRequest {
    /// Contextual factors
    #[serde(flatten)]
    pub context: RiskContext,
}

/// Request body for an activity trigger forecast.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivityForecastRequest {
    /// Description of the upcoming activity
    pub activity: String,
    /// Contextual factors (stress level is the one consulted)
    #[serde(default)]
    pub context: RiskContext,
}

/// Request body for a manual environment adjustment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ManualAdjustmentRequest {
    /// Setting name: lighting, volume, temperature, visual_complexity
    pub setting: String,
    /// Target value, clamped to [0, 1]
    pub value: f64,
}

/// Response after a manual adjustment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ManualAdjustmentResponse {
    /// Setting that changed
    pub setting: String,
    /// Value before the override
    pub old_value: f64,
    /// Clamped value after the override
    pub new_value: f64,
    /// When the override was applied
    pub timestamp: DateTime<Utc>,
}

/// Request body replacing a user's environment preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PreferencesRequest {
    /// Setting-name to value map; values clamped to [0, 1]
    pub preferences: HashMap<String, f64>,
}

/// Environment settings snapshot response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EnvironmentResponse {
    /// Current settings, each in [0, 1]
    pub settings: EnvironmentSettings,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    /// Always "healthy" when the service answers
    pub status: &'static str,
    /// Service identifier
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_deserialize() {
        let json = r#"{
            "sound_level": 45,
            "light_level": 60,
            "touch_level": 35,
            "user_id": "user_001"
        }"#;

        let req: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.sound_level, 45);
        assert_eq!(req.user_id.as_deref(), Some("user_001"));
    }

    #[test]
    fn test_risk_request_fields_flatten_with_defaults() {
        let req: RiskRequest =
            serde_json::from_str(r#"{"hour": 23, "environment_changed": true}"#).unwrap();
        assert_eq!(req.context.hour, 23);
        assert!(req.context.environment_changed);
        assert!(!req.context.routine_disrupted);
    }

    #[test]
    fn test_analyze_response_wire_shape() {
        let mut individual_scores = HashMap::new();
        individual_scores.insert("sound_level".to_string(), 45);

        let response = AnalyzeResponse {
            sensory_state: SensoryState::UnderStimulated,
            sensory_score: 15.0,
            individual_scores,
            recommendation: "r".to_string(),
            alert_level: AlertLevel::Medium,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"sensory_state\":\"under-stimulated\""));
        assert!(json.contains("\"alert_level\":\"medium\""));
    }
}

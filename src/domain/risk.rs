//! Forward-looking trigger-risk types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Banded risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 0.3
    Low,
    /// Score in [0.3, 0.6)
    Moderate,
    /// Score at or above 0.6
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Contextual factors feeding the risk model. Independent of the live
/// sensory stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContext {
    /// Hour of day, 0-23
    #[serde(default = "default_hour")]
    pub hour: u32,
    /// Whether the environment recently changed
    #[serde(default)]
    pub environment_changed: bool,
    /// Current aggregate sensory load, [0, 1]
    #[serde(default)]
    pub sensory_load: f64,
    /// Whether the usual routine was disrupted
    #[serde(default)]
    pub routine_disrupted: bool,
    /// Current stress level, [0, 1]; only consulted by the activity forecast
    #[serde(default)]
    pub stress_level: f64,
}

fn default_hour() -> u32 {
    12
}

impl Default for RiskContext {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            environment_changed: false,
            sensory_load: 0.0,
            routine_disrupted: false,
            stress_level: 0.0,
        }
    }
}

/// Additive risk assessment over a context record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Summed factor score, capped at 1.0
    pub risk_score: f64,
    /// Banded level derived from the score
    pub risk_level: RiskLevel,
    /// Human-readable factors that contributed
    pub contributing_factors: Vec<String>,
    /// Fixed guidance for the level band
    pub recommendations: Vec<String>,
    /// When the assessment was made
    pub timestamp: DateTime<Utc>,
}

/// Keyword-based trigger forecast for an upcoming activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerForecast {
    /// The activity description that was scored
    pub activity: String,
    /// Combined keyword + stress likelihood, capped at 1.0
    pub trigger_likelihood: f64,
    /// Banded level: >0.6 high, >0.3 moderate, else low
    pub risk_level: RiskLevel,
    /// Vocabulary keywords found in the activity text
    pub identified_triggers: Vec<String>,
    /// Preparation tips keyed off the matched keywords
    pub preparation_suggestions: Vec<String>,
    /// When the forecast was made
    pub timestamp: DateTime<Utc>,
}

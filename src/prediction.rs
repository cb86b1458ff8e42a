//! Forward-looking trigger-risk estimation.
//!
//! Both entry points are pure functions over a context record; neither
//! touches the live reading history. Assessments are retained append-only
//! for trend queries.

use chrono::Utc;

use crate::domain::{RiskAssessment, RiskContext, RiskLevel, TriggerForecast};

/// Fixed vocabulary matched against upcoming-activity descriptions.
const TRIGGER_KEYWORDS: [&str; 5] = ["crowd", "loud", "bright", "unfamiliar", "change"];

/// Scores trigger risk from contextual factors and activity descriptions.
#[derive(Debug, Default)]
pub struct TriggerRiskEstimator {
    history: Vec<RiskAssessment>,
}

impl TriggerRiskEstimator {
    /// Create an estimator with an empty trend history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Additive risk over the context: +0.2 outside 8..=20 hours, +0.3 on
    /// environment change, +0.3 when sensory load exceeds 0.7, +0.2 on
    /// routine disruption; capped at 1.0.
    pub fn assess_risk(&mut self, context: &RiskContext) -> RiskAssessment {
        let mut risk_score: f64 = 0.0;
        let mut contributing_factors = Vec::new();

        if context.hour < 8 || context.hour > 20 {
            risk_score += 0.2;
            contributing_factors.push("Time of day (transition period)".to_string());
        }
        if context.environment_changed {
            risk_score += 0.3;
            contributing_factors.push("Environment change detected".to_string());
        }
        if context.sensory_load > 0.7 {
            risk_score += 0.3;
            contributing_factors.push("High sensory load".to_string());
        }
        if context.routine_disrupted {
            risk_score += 0.2;
            contributing_factors.push("Routine disruption".to_string());
        }

        let risk_score = risk_score.min(1.0);
        let risk_level = Self::level_for(risk_score);

        let assessment = RiskAssessment {
            risk_score,
            risk_level,
            contributing_factors,
            recommendations: Self::level_recommendations(risk_level),
            timestamp: Utc::now(),
        };

        self.history.push(assessment.clone());
        assessment
    }

    /// Keyword-matched likelihood for an upcoming activity.
    ///
    /// Each vocabulary keyword found (case-insensitive substring) adds 0.2;
    /// the current stress level contributes 0.3 of its value; the sum is
    /// capped at 1.0. Bands: >0.6 high, >0.3 moderate, else low.
    pub fn predict_trigger_likelihood(
        &self,
        upcoming_activity: &str,
        context: &RiskContext,
    ) -> TriggerForecast {
        let activity_lower = upcoming_activity.to_lowercase();
        let identified_triggers: Vec<String> = TRIGGER_KEYWORDS
            .iter()
            .filter(|kw| activity_lower.contains(**kw))
            .map(|kw| kw.to_string())
            .collect();

        let base_risk = identified_triggers.len() as f64 * 0.2;
        let context_risk = context.stress_level * 0.3;
        let trigger_likelihood = (base_risk + context_risk).min(1.0);

        let risk_level = if trigger_likelihood > 0.6 {
            RiskLevel::High
        } else if trigger_likelihood > 0.3 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        TriggerForecast {
            activity: upcoming_activity.to_string(),
            trigger_likelihood,
            risk_level,
            preparation_suggestions: Self::preparation_tips(&identified_triggers),
            identified_triggers,
            timestamp: Utc::now(),
        }
    }

    /// The last `limit` context assessments, oldest first.
    pub fn recent_assessments(&self, limit: usize) -> &[RiskAssessment] {
        let skip = self.history.len().saturating_sub(limit);
        &self.history[skip..]
    }

    fn level_for(score: f64) -> RiskLevel {
        if score < 0.3 {
            RiskLevel::Low
        } else if score < 0.6 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    fn level_recommendations(level: RiskLevel) -> Vec<String> {
        let lines: &[&str] = match level {
            RiskLevel::Low => &["Continue current activities", "Monitor for changes"],
            RiskLevel::Moderate => &[
                "Reduce sensory stimulation",
                "Prepare calming activities",
                "Stay near safe/quiet space",
            ],
            RiskLevel::High => &[
                "Move to low-stimulation environment immediately",
                "Implement calming protocol",
                "Have caregiver provide support",
                "Avoid additional transitions or changes",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn preparation_tips(triggers: &[String]) -> Vec<String> {
        let has = |kw: &str| triggers.iter().any(|t| t == kw);
        let mut tips = Vec::new();

        if has("crowd") || has("loud") {
            tips.push("Bring noise-canceling headphones".to_string());
            tips.push("Plan for quiet breaks".to_string());
        }
        if has("bright") {
            tips.push("Bring sunglasses or cap".to_string());
            tips.push("Choose less bright areas".to_string());
        }
        if has("unfamiliar") || has("change") {
            tips.push("Preview the location with photos/videos".to_string());
            tips.push("Discuss what to expect beforehand".to_string());
            tips.push("Bring comfort items".to_string());
        }

        if tips.is_empty() {
            tips.push("Standard preparation recommended".to_string());
        }
        tips
    }
}

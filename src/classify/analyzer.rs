//! The state classifier: validated levels in, analysis out.

use serde::{Deserialize, Serialize};

use super::strategy::{CentroidClassifier, ClassifierStrategy, ThresholdClassifier};
use crate::domain::{AlertLevel, SensoryState};
use crate::EngineError;

/// Raw score at or above which a non-calm state escalates to a high alert.
const HIGH_ALERT_THRESHOLD: f64 = 80.0;

/// Per-input level at or above which that input is named in the
/// overstimulation recommendation.
const HIGH_INPUT_LEVEL: f64 = 70.0;

/// Validated sensory levels on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensoryLevels {
    /// Sound intensity, 0-100
    pub sound: f64,
    /// Light intensity, 0-100
    pub light: f64,
    /// Touch intensity, 0-100
    pub touch: f64,
}

impl SensoryLevels {
    /// Validate and construct. Out-of-range levels are rejected before any
    /// computation.
    pub fn new(sound: f64, light: f64, touch: f64) -> Result<Self, EngineError> {
        for (field, value) in [("sound_level", sound), ("light_level", light), ("touch_level", touch)]
        {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(EngineError::InvalidInputRange {
                    field,
                    value,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }
        Ok(Self { sound, light, touch })
    }

    /// Mean of the three levels.
    pub fn score(&self) -> f64 {
        (self.sound + self.light + self.touch) / 3.0
    }
}

/// Full per-sample analysis of a set of levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensoryAnalysis {
    /// Classified state
    pub state: SensoryState,
    /// Mean score, 0-100
    pub score: f64,
    /// The levels that were classified
    pub levels: SensoryLevels,
    /// Caregiver-facing recommendation for the state
    pub recommendation: String,
    /// Caregiver alert level
    pub alert_level: AlertLevel,
}

/// Classifies sensory levels into a state, alert level, and recommendation.
///
/// Holds an optional accelerator strategy; when the accelerator declines or
/// was never constructed, the deterministic threshold rule decides. Pure
/// w.r.t. the session: no reading history is consulted.
pub struct StateClassifier {
    accelerator: Option<Box<dyn ClassifierStrategy>>,
}

impl StateClassifier {
    /// Classifier backed by the threshold rule alone.
    pub fn rule_based() -> Self {
        Self { accelerator: None }
    }

    /// Classifier with the centroid accelerator when it verifies cleanly,
    /// falling back to rule-based otherwise.
    pub fn with_accelerator() -> Self {
        match CentroidClassifier::new() {
            Ok(model) => Self { accelerator: Some(Box::new(model)) },
            Err(err) => {
                tracing::warn!(error = %err, "centroid model failed verification, using threshold rule");
                Self { accelerator: None }
            }
        }
    }

    /// Name of the strategy currently deciding classifications.
    pub fn strategy_name(&self) -> &'static str {
        self.accelerator.as_deref().map_or("threshold", ClassifierStrategy::name)
    }

    /// Analyze a set of levels.
    pub fn analyze(&self, levels: SensoryLevels) -> SensoryAnalysis {
        let score = levels.score();

        let state = self
            .accelerator
            .as_deref()
            .and_then(|s| s.classify(score))
            .unwrap_or_else(|| ThresholdClassifier::classify_score(score));

        let recommendation = self.recommend(state, &levels);
        let alert_level = Self::alert_level(state, score);

        SensoryAnalysis { state, score, levels, recommendation, alert_level }
    }

    /// Alert level for a classified state.
    ///
    /// Calm is always low. Non-calm states check the raw score against the
    /// high-alert threshold, not the state: a score of 75 is overstimulated
    /// but only a medium alert.
    fn alert_level(state: SensoryState, score: f64) -> AlertLevel {
        if state == SensoryState::Calm {
            AlertLevel::Low
        } else if score >= HIGH_ALERT_THRESHOLD {
            AlertLevel::High
        } else {
            AlertLevel::Medium
        }
    }

    fn recommend(&self, state: SensoryState, levels: &SensoryLevels) -> String {
        match state {
            SensoryState::Calm => {
                "Current sensory environment is comfortable. \
                 Continue with regular activities. Monitor for changes."
                    .to_string()
            }
            SensoryState::Overstimulated => Self::overstimulation_recommendation(levels),
            SensoryState::UnderStimulated => {
                "UNDER-STIMULATED: Try engaging activities like music, fidget toys, \
                 or gentle movement. Seek sensory input to improve engagement."
                    .to_string()
            }
        }
    }

    /// Names the individual inputs driving the overstimulation, when any
    /// single input is high on its own.
    fn overstimulation_recommendation(levels: &SensoryLevels) -> String {
        let mut high_inputs = Vec::new();
        if levels.sound >= HIGH_INPUT_LEVEL {
            high_inputs.push("loud sounds");
        }
        if levels.light >= HIGH_INPUT_LEVEL {
            high_inputs.push("bright light");
        }
        if levels.touch >= HIGH_INPUT_LEVEL {
            high_inputs.push("tactile input");
        }

        if high_inputs.is_empty() {
            "OVERSTIMULATED: Overall sensory input is high. \
             Reduce environmental stimuli and take a break."
                .to_string()
        } else {
            format!(
                "OVERSTIMULATED: Reduce {}. \
                 Find a quiet, dimly-lit space. Try deep breathing or calming activities.",
                high_inputs.join(", ")
            )
        }
    }
}

impl Default for StateClassifier {
    fn default() -> Self {
        Self::with_accelerator()
    }
}

impl std::fmt::Debug for StateClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateClassifier")
            .field("strategy", &self.strategy_name())
            .finish()
    }
}

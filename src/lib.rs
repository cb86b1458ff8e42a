//! # Sensory State Engine
//!
//! Multi-modal sensory state classification, overload detection, and
//! adaptive environment control for caregiver-assisted sensory support.
//!
//! The engine ingests visual, audio, and tactile readings for an individual,
//! classifies an instantaneous sensory state, detects sustained overload
//! across a sliding window, and drives a closed feedback loop that adjusts
//! environmental controls and emits caregiver-facing guidance.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    sensory-state-engine                    │
//! ├────────────────────────────────────────────────────────────┤
//! │  raw signal ─► Normalizer ─► history ─► OverloadDetector   │
//! │                                              │             │
//! │  levels ─► StateClassifier          EnvironmentController  │
//! │                                              │             │
//! │  settings feed back as the next cycle's baseline ◄─────────┤
//! │                                                            │
//! │  TriggerRiskEstimator / PreferenceLearner run off the      │
//! │  same history store, independent of the live stream        │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded, synchronous, call-and-return. Shared
//! mutable state belongs to exactly one [`SensorySession`] per user;
//! concurrent callers must serialize access externally (the bundled
//! [`api`] layer does this with one lock around the session map).
//!
//! ## Example
//!
//! ```rust
//! use sensory_state_engine::{SensorySession, SessionConfig};
//!
//! # fn main() -> Result<(), sensory_state_engine::EngineError> {
//! let mut session = SensorySession::new("user_001", SessionConfig::default());
//!
//! // Ingest a bright frame and a loud buffer
//! session.process_visual_input(&vec![240.0; 64])?;
//! session.process_audio_input(&vec![0.9; 1024], 44_100)?;
//!
//! // Windowed check: detect overload and adjust the environment
//! let outcome = session.check_and_respond();
//! println!("severity {}", outcome.assessment.severity);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod classify;
pub mod domain;
pub mod environment;
pub mod learning;
pub mod normalize;
pub mod overload;
pub mod prediction;

use std::collections::HashMap;

pub use classify::{SensoryAnalysis, SensoryLevels, StateClassifier};
pub use domain::{
    AlertLevel, ComfortLevel, ComfortPrediction, ComfortProfile, Intensity, Modality,
    OverloadAssessment, ReadingHistory, RiskAssessment, RiskContext, RiskLevel, SensoryReading,
    SensoryState, TriggerForecast,
};
pub use environment::{
    EnvironmentAdjustment, EnvironmentController, EnvironmentSettings, ManualAdjustment,
    SettingKey,
};
pub use learning::{LearnOutcome, LearnerConfig, PreferenceLearner};
pub use normalize::{Normalizer, NormalizerConfig};
pub use overload::{OverloadConfig, OverloadDetector};
pub use prediction::TriggerRiskEstimator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Unified error type for the engine.
///
/// Classification and risk scoring are pure and never fail for well-typed
/// input; only input validation and normalization can error, and no error is
/// ever converted into a calm or low-risk result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A sensory level was outside its documented range
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidInputRange {
        /// Which field was rejected
        field: &'static str,
        /// The offending value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Manual adjustment named a setting that does not exist
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// A raw signal buffer was empty
    #[error("empty {modality} signal buffer")]
    EmptySignal {
        /// Modality whose buffer was empty
        modality: Modality,
    },

    /// Numeric computation on a raw signal failed
    #[error("computation failed: {0}")]
    Computation(String),
}

/// Configuration for one sensory session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Normalizer thresholds and history sizing
    pub normalizer: NormalizerConfig,
    /// Overload detection threshold and window
    pub overload: OverloadConfig,
    /// Preference learning minimums
    pub learner: LearnerConfig,
}

impl SessionConfig {
    /// Create a configuration builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the overload detection threshold, clamped to [0, 1].
    pub fn overload_threshold(mut self, threshold: f64) -> Self {
        self.config.overload.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the detection window size (minimum 1).
    pub fn window(mut self, window: usize) -> Self {
        self.config.overload.window = window.max(1);
        self
    }

    /// Set the per-modality overwhelm thresholds, each clamped to [0, 1].
    pub fn modality_thresholds(mut self, visual: f64, audio: f64, tactile: f64) -> Self {
        self.config.normalizer.visual_threshold = visual.clamp(0.0, 1.0);
        self.config.normalizer.audio_threshold = audio.clamp(0.0, 1.0);
        self.config.normalizer.tactile_threshold = tactile.clamp(0.0, 1.0);
        self
    }

    /// Set how many readings the session history retains.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.normalizer.history_capacity = capacity.max(1);
        self
    }

    /// Set the minimum sample count for preference learning.
    pub fn min_learning_samples(mut self, min_samples: usize) -> Self {
        self.config.learner.min_samples = min_samples.max(1);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

/// Outcome of one overload check-and-respond cycle.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The windowed overload assessment
    pub assessment: OverloadAssessment,
    /// The environment adjustment, when overload was detected
    pub adjustment: Option<EnvironmentAdjustment>,
    /// Settings after the cycle
    pub current_settings: EnvironmentSettings,
}

/// Summary of a session's activity so far.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionSummary {
    /// Session owner
    pub user_id: String,
    /// Total readings ever ingested (including evicted ones)
    pub total_inputs_processed: u64,
    /// Number of detected overload events
    pub overload_events: u64,
    /// The most recent detected assessments
    pub recent_alerts: Vec<OverloadAssessment>,
    /// Current environment settings
    pub current_environment: EnvironmentSettings,
}

/// Per-user coordinator owning the full feedback loop.
///
/// Holds the normalizer (and its reading history), the overload detector,
/// the environment controller, and the preference learner for one user.
/// Single-writer: a session must not be shared across threads without
/// external serialization.
#[derive(Debug)]
pub struct SensorySession {
    user_id: String,
    normalizer: Normalizer,
    detector: OverloadDetector,
    controller: EnvironmentController,
    learner: PreferenceLearner,
    window: usize,
}

impl SensorySession {
    /// Create a session for a user.
    pub fn new(user_id: impl Into<String>, config: SessionConfig) -> Self {
        let window = config.overload.window;
        Self {
            user_id: user_id.into(),
            normalizer: Normalizer::new(config.normalizer),
            detector: OverloadDetector::new(config.overload),
            controller: EnvironmentController::new(),
            learner: PreferenceLearner::new(config.learner),
            window,
        }
    }

    /// Ingest a visual frame.
    pub fn process_visual_input(&mut self, pixels: &[f64]) -> Result<SensoryReading> {
        self.normalizer.analyze_visual(pixels)
    }

    /// Ingest an audio sample buffer.
    pub fn process_audio_input(&mut self, samples: &[f64], sample_rate: u32) -> Result<SensoryReading> {
        self.normalizer.analyze_audio(samples, sample_rate)
    }

    /// Ingest tactile scalars.
    pub fn process_tactile_input(
        &mut self,
        pressure: f64,
        temperature: f64,
        texture: &str,
    ) -> Result<SensoryReading> {
        self.normalizer.analyze_tactile(pressure, temperature, texture)
    }

    /// Run one detection cycle over the recent window and, when overload is
    /// detected, apply an automatic environment correction.
    pub fn check_and_respond(&mut self) -> CheckOutcome {
        let window = self.normalizer.recent_history(self.window);
        let assessment = self.detector.assess(&window);

        let adjustment = if assessment.detected {
            Some(self.controller.adjust(&assessment))
        } else {
            None
        };

        CheckOutcome {
            assessment,
            adjustment,
            current_settings: self.controller.current_settings(),
        }
    }

    /// Replace the user's environment preferences.
    pub fn set_preferences(&mut self, preferences: HashMap<SettingKey, f64>) {
        self.controller.set_preferences(preferences);
    }

    /// Manually override one environment setting.
    pub fn manual_adjustment(&mut self, setting: SettingKey, value: f64) -> Result<ManualAdjustment> {
        self.controller.manual_adjustment(setting, value)
    }

    /// Learn a comfort profile from the full retained history.
    pub fn learn_preferences(&mut self) -> LearnOutcome {
        let readings: Vec<SensoryReading> = self.normalizer.history().all().cloned().collect();
        self.learner.learn_preferences(&readings)
    }

    /// Predict comfort for a candidate intensity against the latest profile.
    pub fn predict_comfort(&self, modality: Modality, intensity: f64) -> ComfortPrediction {
        self.learner.predict_comfort_level(modality, intensity)
    }

    /// Current environment settings snapshot.
    pub fn current_settings(&self) -> EnvironmentSettings {
        self.controller.current_settings()
    }

    /// Session summary for caregiver display.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            user_id: self.user_id.clone(),
            total_inputs_processed: self.normalizer.history().total_pushed(),
            overload_events: self.detector.overload_count(),
            recent_alerts: self.detector.recent_alerts(3).to_vec(),
            current_environment: self.controller.current_settings(),
        }
    }

    /// Session owner.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The learner, for direct profile queries.
    pub fn learner(&self) -> &PreferenceLearner {
        &self.learner
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        AlertLevel, CheckOutcome, ComfortLevel, ComfortPrediction, EngineError,
        EnvironmentController, EnvironmentSettings, LearnOutcome, Modality, Normalizer,
        OverloadAssessment, OverloadDetector, PreferenceLearner, Result, RiskAssessment,
        RiskContext, RiskLevel, SensoryAnalysis, SensoryLevels, SensoryReading, SensorySession,
        SensoryState, SessionConfig, SessionSummary, SettingKey, StateClassifier,
        TriggerForecast, TriggerRiskEstimator,
    };
}

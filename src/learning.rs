//! Comfort-profile learning from accumulated readings.
//!
//! Aggregates historically non-overwhelming samples per modality into a
//! comfort-range model. Profiles are rebuilt wholesale on each learning pass
//! and superseded, never merged; every learned generation is retained
//! append-only for traceability.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::{
    ComfortLevel, ComfortPrediction, ComfortProfile, ComfortRange, Modality, SensoryReading,
    TriggerPattern,
};
use crate::domain::profile::ModalityProfile;

/// Outcome of a learning pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LearnOutcome {
    /// Not enough samples to learn from. A status, not an error.
    InsufficientData {
        /// Samples observed
        samples: usize,
        /// Minimum required
        required: usize,
    },
    /// A new profile was learned and is now current.
    Learned(ComfortProfile),
}

/// Configuration for preference learning.
#[derive(Debug, Clone)]
pub struct LearnerConfig {
    /// Minimum number of samples required for a learning pass
    pub min_samples: usize,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self { min_samples: 5 }
    }
}

/// Learns per-modality comfort ranges and trigger patterns.
#[derive(Debug, Default)]
pub struct PreferenceLearner {
    config: LearnerConfig,
    learned_profiles: Vec<ComfortProfile>,
}

impl PreferenceLearner {
    /// Create a learner.
    pub fn new(config: LearnerConfig) -> Self {
        Self {
            config,
            learned_profiles: Vec::new(),
        }
    }

    /// Create with the default minimum sample count.
    pub fn with_defaults() -> Self {
        Self::new(LearnerConfig::default())
    }

    /// Learn a new profile from accumulated readings.
    ///
    /// Below the minimum sample count an `InsufficientData` status is
    /// returned and nothing changes. Otherwise comfortable (non-overwhelming)
    /// samples yield a `{min, max, preferred}` range of the primary intensity
    /// for visual and audio; tactile ranges are deliberately not learned.
    /// Overwhelming samples yield a single `high_intensity` trigger with its
    /// observed frequency.
    pub fn learn_preferences(&mut self, readings: &[SensoryReading]) -> LearnOutcome {
        if readings.len() < self.config.min_samples {
            return LearnOutcome::InsufficientData {
                samples: readings.len(),
                required: self.config.min_samples,
            };
        }

        let mut preferences = HashMap::new();
        for modality in Modality::ALL {
            let modality_samples: Vec<&SensoryReading> =
                readings.iter().filter(|r| r.modality == modality).collect();
            if modality_samples.is_empty() {
                continue;
            }

            let comfortable: Vec<f64> = modality_samples
                .iter()
                .filter(|r| !r.is_overwhelming)
                .map(|r| r.intensity.value())
                .collect();

            let comfortable_range = match modality {
                Modality::Visual | Modality::Audio if !comfortable.is_empty() => {
                    Some(ComfortRange {
                        min: comfortable.iter().copied().fold(f64::INFINITY, f64::min),
                        max: comfortable.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                        preferred: comfortable.iter().sum::<f64>() / comfortable.len() as f64,
                    })
                }
                // No tactile range model exists yet; tactile profiles carry
                // triggers only
                _ => None,
            };

            let overwhelming_count =
                modality_samples.iter().filter(|r| r.is_overwhelming).count();
            let triggers = if overwhelming_count > 0 {
                vec![TriggerPattern {
                    condition: "high_intensity".to_string(),
                    frequency: overwhelming_count as f64 / modality_samples.len() as f64,
                }]
            } else {
                Vec::new()
            };

            preferences.insert(modality, ModalityProfile { comfortable_range, triggers });
        }

        let profile = ComfortProfile {
            preferences,
            total_samples: readings.len(),
            learned_at: Utc::now(),
        };

        tracing::info!(
            samples = readings.len(),
            generation = self.learned_profiles.len() + 1,
            "learned comfort profile"
        );
        self.learned_profiles.push(profile.clone());
        LearnOutcome::Learned(profile)
    }

    /// Predict comfort for a candidate intensity against the most recently
    /// learned profile only.
    ///
    /// No profile at all, or no data for the modality, yields `unknown` at
    /// confidence 0.0. A profile without a learned range for the modality
    /// yields `uncertain` at 0.3. Otherwise in-range is `comfortable` and
    /// out-of-range `uncomfortable`, both at the fixed confidence 0.8.
    pub fn predict_comfort_level(&self, modality: Modality, intensity: f64) -> ComfortPrediction {
        let Some(profile) = self.learned_profiles.last() else {
            return ComfortPrediction::new(ComfortLevel::Unknown, 0.0, modality);
        };

        let Some(modality_profile) = profile.modality(modality) else {
            return ComfortPrediction::new(ComfortLevel::Unknown, 0.0, modality);
        };

        let Some(range) = modality_profile.comfortable_range else {
            return ComfortPrediction::new(ComfortLevel::Uncertain, 0.3, modality);
        };

        if range.contains(intensity) {
            ComfortPrediction::new(ComfortLevel::Comfortable, 0.8, modality)
        } else {
            ComfortPrediction::new(ComfortLevel::Uncomfortable, 0.8, modality)
        }
    }

    /// The currently active profile, if any pass has succeeded.
    pub fn current_profile(&self) -> Option<&ComfortProfile> {
        self.learned_profiles.last()
    }

    /// Every learned profile generation, oldest first.
    pub fn profile_history(&self) -> &[ComfortProfile] {
        &self.learned_profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(modality: Modality, intensity: f64, overwhelming: bool) -> SensoryReading {
        SensoryReading::new(modality, intensity, 0.0, overwhelming)
    }

    #[test]
    fn test_insufficient_data_is_a_status() {
        let mut learner = PreferenceLearner::with_defaults();
        let readings: Vec<_> = (0..4).map(|_| reading(Modality::Visual, 0.4, false)).collect();

        assert_eq!(
            learner.learn_preferences(&readings),
            LearnOutcome::InsufficientData { samples: 4, required: 5 }
        );
        assert!(learner.current_profile().is_none());
    }

    #[test]
    fn test_visual_range_from_comfortable_samples() {
        let mut learner = PreferenceLearner::with_defaults();
        let readings = vec![
            reading(Modality::Visual, 0.2, false),
            reading(Modality::Visual, 0.4, false),
            reading(Modality::Visual, 0.6, false),
            reading(Modality::Visual, 0.9, true),
            reading(Modality::Audio, 0.3, false),
        ];

        let LearnOutcome::Learned(profile) = learner.learn_preferences(&readings) else {
            panic!("expected a learned profile");
        };

        let visual = profile.modality(Modality::Visual).unwrap();
        let range = visual.comfortable_range.unwrap();
        assert!((range.min - 0.2).abs() < 1e-9);
        assert!((range.max - 0.6).abs() < 1e-9);
        assert!((range.preferred - 0.4).abs() < 1e-9);

        // one overwhelming out of four visual samples
        assert_eq!(visual.triggers.len(), 1);
        assert_eq!(visual.triggers[0].condition, "high_intensity");
        assert!((visual.triggers[0].frequency - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_tactile_range_never_learned() {
        let mut learner = PreferenceLearner::with_defaults();
        let readings: Vec<_> = (0..6).map(|_| reading(Modality::Tactile, 0.3, false)).collect();

        let LearnOutcome::Learned(profile) = learner.learn_preferences(&readings) else {
            panic!("expected a learned profile");
        };

        let tactile = profile.modality(Modality::Tactile).unwrap();
        assert!(tactile.comfortable_range.is_none());

        // range-less modality predicts uncertain at 0.3
        let prediction = learner.predict_comfort_level(Modality::Tactile, 0.3);
        assert_eq!(prediction.prediction, ComfortLevel::Uncertain);
        assert!((prediction.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_before_learning_is_unknown() {
        let learner = PreferenceLearner::with_defaults();
        let prediction = learner.predict_comfort_level(Modality::Visual, 0.5);
        assert_eq!(prediction.prediction, ComfortLevel::Unknown);
        assert_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn test_prediction_against_learned_range() {
        let mut learner = PreferenceLearner::with_defaults();
        let readings = vec![
            reading(Modality::Audio, 0.3, false),
            reading(Modality::Audio, 0.5, false),
            reading(Modality::Audio, 0.4, false),
            reading(Modality::Audio, 0.35, false),
            reading(Modality::Audio, 0.45, false),
        ];
        learner.learn_preferences(&readings);

        let inside = learner.predict_comfort_level(Modality::Audio, 0.4);
        assert_eq!(inside.prediction, ComfortLevel::Comfortable);
        assert!((inside.confidence - 0.8).abs() < 1e-9);

        let outside = learner.predict_comfort_level(Modality::Audio, 0.9);
        assert_eq!(outside.prediction, ComfortLevel::Uncomfortable);
        assert!((outside.confidence - 0.8).abs() < 1e-9);

        // modality with no data in the learned profile
        let unseen = learner.predict_comfort_level(Modality::Visual, 0.5);
        assert_eq!(unseen.prediction, ComfortLevel::Unknown);
    }

    #[test]
    fn test_profiles_superseded_not_merged() {
        let mut learner = PreferenceLearner::with_defaults();

        let first: Vec<_> = (0..5).map(|_| reading(Modality::Audio, 0.2, false)).collect();
        learner.learn_preferences(&first);

        let second: Vec<_> = (0..5).map(|_| reading(Modality::Audio, 0.8, false)).collect();
        learner.learn_preferences(&second);

        assert_eq!(learner.profile_history().len(), 2);

        // only the latest generation is consulted
        let prediction = learner.predict_comfort_level(Modality::Audio, 0.2);
        assert_eq!(prediction.prediction, ComfortLevel::Uncomfortable);
    }
}

//! Learned comfort profiles.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::Modality;

/// Learned [min, max] of a modality's primary metric across historically
/// non-overwhelming samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortRange {
    /// Lowest comfortable value observed
    pub min: f64,
    /// Highest comfortable value observed
    pub max: f64,
    /// Mean of the comfortable values
    pub preferred: f64,
}

impl ComfortRange {
    /// Whether a value falls inside the learned range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// An observed trigger condition and how often it occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPattern {
    /// Condition label, currently always `high_intensity`
    pub condition: String,
    /// Fraction of the modality's samples that were overwhelming
    pub frequency: f64,
}

/// Per-modality learned preferences for one profile generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModalityProfile {
    /// Comfortable operating range, when enough calm samples existed.
    /// Tactile profiles never carry one; only visual and audio ranges are
    /// learned.
    pub comfortable_range: Option<ComfortRange>,
    /// Observed trigger conditions
    pub triggers: Vec<TriggerPattern>,
}

/// A complete learned profile, rebuilt wholesale on each learning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortProfile {
    /// Per-modality preferences
    pub preferences: HashMap<Modality, ModalityProfile>,
    /// Number of samples the profile was learned from
    pub total_samples: usize,
    /// When the profile was learned
    pub learned_at: DateTime<Utc>,
}

impl ComfortProfile {
    /// Profile for a modality, if the learning pass saw any data for it.
    pub fn modality(&self, modality: Modality) -> Option<&ModalityProfile> {
        self.preferences.get(&modality)
    }
}

/// Predicted comfort classification for a candidate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    /// Inside the learned comfortable range
    Comfortable,
    /// Outside the learned comfortable range
    Uncomfortable,
    /// A profile exists but no range was learned for the modality
    Uncertain,
    /// No learned profile to consult
    Unknown,
}

/// Outcome of consulting the most recently learned profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortPrediction {
    /// Predicted comfort classification
    pub prediction: ComfortLevel,
    /// Fixed confidence for the prediction path taken
    pub confidence: f64,
    /// Modality the prediction applies to
    pub modality: Modality,
    /// When the prediction was made
    pub timestamp: DateTime<Utc>,
}

impl ComfortPrediction {
    pub(crate) fn new(prediction: ComfortLevel, confidence: f64, modality: Modality) -> Self {
        Self {
            prediction,
            confidence,
            modality,
            timestamp: Utc::now(),
        }
    }
}

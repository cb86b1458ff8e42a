//! Instantaneous sensory state and caregiver alert level.

use serde::{Deserialize, Serialize};

/// Discrete classification of the current sensory load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensoryState {
    /// Balanced input, no intervention needed
    Calm,
    /// Too much input; score at or above the overstimulation threshold
    Overstimulated,
    /// Insufficient input; score at or below the under-stimulation threshold
    #[serde(rename = "under-stimulated")]
    UnderStimulated,
}

impl std::fmt::Display for SensoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensoryState::Calm => write!(f, "calm"),
            SensoryState::Overstimulated => write!(f, "overstimulated"),
            SensoryState::UnderStimulated => write!(f, "under-stimulated"),
        }
    }
}

/// Caregiver-facing urgency, separate from the state itself.
///
/// A calm state is always `Low`. For non-calm states the level is decided by
/// the raw score against the high-alert threshold, not by the state — a score
/// of 75 is overstimulated but only `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// No caregiver action needed
    Low,
    /// Moderate concern, monitor
    Medium,
    /// Severe over- or under-stimulation
    High,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Low => write!(f, "low"),
            AlertLevel::Medium => write!(f, "medium"),
            AlertLevel::High => write!(f, "high"),
        }
    }
}

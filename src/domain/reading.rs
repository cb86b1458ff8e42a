//! Normalized sensory readings and their modality tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sensory channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Light, contrast, visual complexity
    Visual,
    /// Ambient and direct sound
    Audio,
    /// Pressure, temperature, texture
    Tactile,
}

impl Modality {
    /// All modalities in the fixed evaluation order used throughout the
    /// engine (recommendations, preference learning).
    pub const ALL: [Modality; 3] = [Modality::Visual, Modality::Audio, Modality::Tactile];
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modality::Visual => write!(f, "visual"),
            Modality::Audio => write!(f, "audio"),
            Modality::Tactile => write!(f, "tactile"),
        }
    }
}

/// Unit-interval intensity, clamped to [0.0, 1.0] at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(f64);

impl Intensity {
    /// Create an intensity, clamping the value into [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(0.0)
    }
}

/// A normalized reading for a single modality at a point in time.
///
/// Immutable once created. Produced by the [`Normalizer`](crate::Normalizer)
/// and appended to the per-session history in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensoryReading {
    /// Which channel produced this reading
    pub modality: Modality,
    /// Primary normalized intensity (brightness, volume, combined tactile)
    pub intensity: Intensity,
    /// Modality-specific secondary metric: contrast (visual), raw decibels
    /// (audio), combined intensity (tactile)
    pub secondary: f64,
    /// Whether the modality-specific threshold was exceeded
    pub is_overwhelming: bool,
    /// Free-form texture label, tactile readings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
}

impl SensoryReading {
    /// Create a reading with the current timestamp. Intensity is clamped at
    /// write time.
    pub fn new(modality: Modality, intensity: f64, secondary: f64, is_overwhelming: bool) -> Self {
        Self {
            modality,
            intensity: Intensity::new(intensity),
            secondary,
            is_overwhelming,
            texture: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a texture label (tactile readings).
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}

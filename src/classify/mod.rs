//! Instantaneous sensory state classification.
//!
//! Classification operates on the externally-facing 0-100 level scale, not
//! the unit-interval readings. The deterministic threshold rule is the
//! system of record; a statistical strategy may accelerate it but can never
//! change the observed boundaries at 30, 70, and 80.

mod analyzer;
mod strategy;

pub use analyzer::{SensoryAnalysis, SensoryLevels, StateClassifier};
pub use strategy::{CentroidClassifier, ClassifierStrategy, ThresholdClassifier};

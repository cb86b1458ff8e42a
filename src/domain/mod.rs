//! Domain value objects for the sensory state engine.
//!
//! Everything here is a plain data type with its invariants enforced at
//! construction: unit-interval fields are clamped at write time, never at
//! read time, and derived quantities (severity, scores) are computed once
//! and stored immutably.

pub mod assessment;
pub mod history;
pub mod profile;
pub mod reading;
pub mod risk;
pub mod state;

pub use assessment::OverloadAssessment;
pub use history::ReadingHistory;
pub use profile::{
    ComfortLevel, ComfortPrediction, ComfortProfile, ComfortRange, TriggerPattern,
};
pub use reading::{Intensity, Modality, SensoryReading};
pub use risk::{RiskAssessment, RiskContext, RiskLevel, TriggerForecast};
pub use state::{AlertLevel, SensoryState};

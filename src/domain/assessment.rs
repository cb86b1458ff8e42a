//! Windowed overload assessments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of examining a window of recent readings for sustained overload.
///
/// Ephemeral and recomputed on demand; `severity` is always
/// `overwhelming_count / total_count` of the window actually examined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadAssessment {
    /// Assessment identifier, used by the alert history
    pub id: Uuid,
    /// Readings in the window that exceeded their modality threshold
    pub overwhelming_count: usize,
    /// Size of the window examined (not the full history)
    pub total_count: usize,
    /// Fraction of overwhelming readings, in [0, 1]
    pub severity: f64,
    /// Whether severity reached the detection threshold
    pub detected: bool,
    /// Ordered caregiver-facing mitigation guidance
    pub recommendations: Vec<String>,
    /// When the assessment was computed
    pub timestamp: DateTime<Utc>,
}

impl OverloadAssessment {
    /// Build an assessment. Severity is derived here, never passed in; an
    /// empty window yields severity 0.0 with nothing detected.
    pub fn new(
        overwhelming_count: usize,
        total_count: usize,
        detected: bool,
        recommendations: Vec<String>,
    ) -> Self {
        let severity = if total_count == 0 {
            0.0
        } else {
            overwhelming_count as f64 / total_count as f64
        };

        Self {
            id: Uuid::new_v4(),
            overwhelming_count,
            total_count,
            severity,
            detected,
            recommendations,
            timestamp: Utc::now(),
        }
    }

    /// An assessment over an empty window: nothing detected, severity 0.
    pub fn empty() -> Self {
        Self::new(0, 0, false, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_exact_fraction() {
        let a = OverloadAssessment::new(3, 10, false, Vec::new());
        assert!((a.severity - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_window_has_zero_severity() {
        let a = OverloadAssessment::empty();
        assert_eq!(a.severity, 0.0);
        assert!(!a.detected);
        assert_eq!(a.total_count, 0);
    }
}

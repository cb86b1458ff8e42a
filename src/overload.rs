//! Sustained overload detection over a window of recent readings.

use crate::domain::{Modality, OverloadAssessment, SensoryReading};

/// Configuration for windowed overload detection.
#[derive(Debug, Clone)]
pub struct OverloadConfig {
    /// Severity at or above which overload is detected
    pub threshold: f64,
    /// Number of recent readings examined per check
    pub window: usize,
    /// Detected assessments retained in the alert history
    pub alert_history_capacity: usize,
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            window: 10,
            alert_history_capacity: 64,
        }
    }
}

/// Detects sensory overload from the fraction of overwhelming readings in a
/// window and produces ordered mitigation guidance.
#[derive(Debug)]
pub struct OverloadDetector {
    config: OverloadConfig,
    overload_count: u64,
    alert_history: Vec<OverloadAssessment>,
}

impl OverloadDetector {
    /// Create a detector.
    pub fn new(config: OverloadConfig) -> Self {
        Self {
            config,
            overload_count: 0,
            alert_history: Vec::new(),
        }
    }

    /// Create with default threshold and window.
    pub fn with_defaults() -> Self {
        Self::new(OverloadConfig::default())
    }

    /// Assess a window of readings.
    ///
    /// Severity is exactly `overwhelming / len(window)`; an empty window is
    /// never detected and never divides by zero. Detected assessments are
    /// appended to the alert history.
    pub fn assess(&mut self, window: &[SensoryReading]) -> OverloadAssessment {
        if window.is_empty() {
            return OverloadAssessment::empty();
        }

        let overwhelming_count = window.iter().filter(|r| r.is_overwhelming).count();
        let severity = overwhelming_count as f64 / window.len() as f64;
        let detected = severity >= self.config.threshold;

        let recommendations = Self::recommendations(severity, window);
        let assessment =
            OverloadAssessment::new(overwhelming_count, window.len(), detected, recommendations);

        if detected {
            self.overload_count += 1;
            tracing::warn!(
                severity,
                overwhelming = overwhelming_count,
                total = window.len(),
                "sensory overload detected"
            );
            if self.alert_history.len() == self.config.alert_history_capacity {
                self.alert_history.remove(0);
            }
            self.alert_history.push(assessment.clone());
        }

        assessment
    }

    /// Deterministic, ordered recommendation list.
    ///
    /// Below 0.3 severity a single comfortable message is returned. Otherwise
    /// each overwhelming modality contributes its mitigation pair in fixed
    /// visual, audio, tactile order; above 0.7 an ALERT line is prepended and
    /// two escalation lines are appended.
    fn recommendations(severity: f64, window: &[SensoryReading]) -> Vec<String> {
        if severity < 0.3 {
            return vec!["Environment is comfortable".to_string()];
        }

        let mut recommendations = Vec::new();
        for modality in Modality::ALL {
            let overwhelming = window
                .iter()
                .any(|r| r.is_overwhelming && r.modality == modality);
            if !overwhelming {
                continue;
            }
            match modality {
                Modality::Visual => {
                    recommendations.push("Reduce lighting or screen brightness".to_string());
                    recommendations.push("Consider using dimmer or blue-light filter".to_string());
                }
                Modality::Audio => {
                    recommendations.push("Reduce ambient noise".to_string());
                    recommendations.push("Consider using noise-canceling headphones".to_string());
                }
                Modality::Tactile => {
                    recommendations.push("Adjust temperature or clothing comfort".to_string());
                    recommendations.push("Reduce physical contact or pressure".to_string());
                }
            }
        }

        if severity > 0.7 {
            recommendations.insert(0, "ALERT: High sensory overload detected".to_string());
            recommendations.push("Move to a quiet, low-stimulation space".to_string());
            recommendations.push("Consider break or rest period".to_string());
        }

        recommendations
    }

    /// The last `limit` detected assessments, oldest first.
    pub fn recent_alerts(&self, limit: usize) -> &[OverloadAssessment] {
        let skip = self.alert_history.len().saturating_sub(limit);
        &self.alert_history[skip..]
    }

    /// How many times overload has been detected this session.
    pub fn overload_count(&self) -> u64 {
        self.overload_count
    }

    /// Active configuration.
    pub fn config(&self) -> &OverloadConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(modality: Modality, overwhelming: bool) -> SensoryReading {
        let intensity = if overwhelming { 0.9 } else { 0.3 };
        SensoryReading::new(modality, intensity, 0.0, overwhelming)
    }

    #[test]
    fn test_empty_window() {
        let mut detector = OverloadDetector::with_defaults();
        let assessment = detector.assess(&[]);
        assert!(!assessment.detected);
        assert_eq!(assessment.severity, 0.0);
        assert!(detector.recent_alerts(5).is_empty());
    }

    #[test]
    fn test_severity_is_exact_window_fraction() {
        let mut detector = OverloadDetector::with_defaults();
        let window: Vec<_> = (0..10)
            .map(|i| reading(Modality::Audio, i < 4))
            .collect();

        let assessment = detector.assess(&window);
        assert_eq!(assessment.overwhelming_count, 4);
        assert_eq!(assessment.total_count, 10);
        assert!((assessment.severity - 0.4).abs() < f64::EPSILON);
        assert!(!assessment.detected);
    }

    #[test]
    fn test_detection_at_threshold() {
        let mut detector = OverloadDetector::with_defaults();
        let window: Vec<_> = (0..10)
            .map(|i| reading(Modality::Audio, i < 7))
            .collect();

        // severity exactly 0.7 -> detected (>= threshold)
        let assessment = detector.assess(&window);
        assert!(assessment.detected);
        assert_eq!(detector.overload_count(), 1);
        assert_eq!(detector.recent_alerts(5).len(), 1);
    }

    #[test]
    fn test_all_visual_overwhelming_recommendation_order() {
        let mut detector = OverloadDetector::with_defaults();
        let window: Vec<_> = (0..10).map(|_| reading(Modality::Visual, true)).collect();

        let assessment = detector.assess(&window);
        assert!((assessment.severity - 1.0).abs() < f64::EPSILON);
        assert!(assessment.detected);

        // ALERT first, then the visual pair, then the two escalation lines
        let recs = &assessment.recommendations;
        assert_eq!(recs[0], "ALERT: High sensory overload detected");
        assert_eq!(recs[1], "Reduce lighting or screen brightness");
        assert_eq!(recs[2], "Consider using dimmer or blue-light filter");
        assert_eq!(recs[3], "Move to a quiet, low-stimulation space");
        assert_eq!(recs[4], "Consider break or rest period");
        assert_eq!(recs.len(), 5);
    }

    #[test]
    fn test_modalities_in_fixed_order() {
        let mut detector = OverloadDetector::with_defaults();
        // Tactile appears before visual in the window, but visual guidance
        // still comes first
        let window = vec![
            reading(Modality::Tactile, true),
            reading(Modality::Visual, true),
            reading(Modality::Audio, false),
        ];

        let assessment = detector.assess(&window);
        let recs = &assessment.recommendations;
        assert!(recs[0].contains("lighting"));
        assert!(recs[2].contains("temperature"));
    }

    #[test]
    fn test_low_severity_single_message() {
        let mut detector = OverloadDetector::with_defaults();
        let window: Vec<_> = (0..10)
            .map(|i| reading(Modality::Visual, i < 2))
            .collect();

        let assessment = detector.assess(&window);
        assert_eq!(assessment.recommendations, vec!["Environment is comfortable".to_string()]);
    }

    #[test]
    fn test_moderate_severity_no_alert_prefix() {
        let mut detector = OverloadDetector::with_defaults();
        let window: Vec<_> = (0..10)
            .map(|i| reading(Modality::Audio, i < 5))
            .collect();

        let assessment = detector.assess(&window);
        assert!(!assessment.detected);
        assert_eq!(assessment.recommendations[0], "Reduce ambient noise");
        assert_eq!(assessment.recommendations.len(), 2);
    }
}

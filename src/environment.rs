//! Adaptive environment control.
//!
//! Owns the mutable per-session environment settings and applies bounded,
//! preference-weighted corrections when overload is signaled. Preferences are
//! an absolute per-key override, not a blend: they overwrite the corrected
//! value after the automatic correction is applied.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::OverloadAssessment;
use crate::EngineError;

/// Correction is capped at this much per adjustment.
const MAX_ADJUSTMENT: f64 = 0.3;

/// An adjustable environment parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Ambient light level
    Lighting,
    /// Ambient sound volume
    Volume,
    /// Room temperature
    Temperature,
    /// Visual busyness of the surroundings
    VisualComplexity,
}

impl SettingKey {
    /// Floor applied during automatic correction. Temperature is never
    /// auto-adjusted and has no floor.
    fn auto_floor(self) -> Option<f64> {
        match self {
            SettingKey::Lighting => Some(0.2),
            SettingKey::Volume => Some(0.1),
            SettingKey::VisualComplexity => Some(0.2),
            SettingKey::Temperature => None,
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingKey::Lighting => write!(f, "lighting"),
            SettingKey::Volume => write!(f, "volume"),
            SettingKey::Temperature => write!(f, "temperature"),
            SettingKey::VisualComplexity => write!(f, "visual_complexity"),
        }
    }
}

impl FromStr for SettingKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lighting" => Ok(SettingKey::Lighting),
            "volume" => Ok(SettingKey::Volume),
            "temperature" => Ok(SettingKey::Temperature),
            "visual_complexity" => Ok(SettingKey::VisualComplexity),
            other => Err(EngineError::UnknownSetting(other.to_string())),
        }
    }
}

/// Current environment settings, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// Ambient light level
    pub lighting: f64,
    /// Ambient sound volume
    pub volume: f64,
    /// Room temperature (manual control only)
    pub temperature: f64,
    /// Visual busyness of the surroundings
    pub visual_complexity: f64,
}

impl EnvironmentSettings {
    /// Value for a key.
    pub fn get(&self, key: SettingKey) -> f64 {
        match key {
            SettingKey::Lighting => self.lighting,
            SettingKey::Volume => self.volume,
            SettingKey::Temperature => self.temperature,
            SettingKey::VisualComplexity => self.visual_complexity,
        }
    }

    /// Set a key, clamping into [0, 1] at write time.
    pub fn set(&mut self, key: SettingKey, value: f64) {
        let value = value.clamp(0.0, 1.0);
        match key {
            SettingKey::Lighting => self.lighting = value,
            SettingKey::Volume => self.volume = value,
            SettingKey::Temperature => self.temperature = value,
            SettingKey::VisualComplexity => self.visual_complexity = value,
        }
    }
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            lighting: 0.5,
            volume: 0.5,
            temperature: 0.5,
            visual_complexity: 0.5,
        }
    }
}

/// Record of one automatic adjustment, with before/after snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentAdjustment {
    /// Whether anything changed
    pub adjusted: bool,
    /// Settings before the correction
    pub previous_settings: EnvironmentSettings,
    /// Settings after correction and preference override
    pub new_settings: EnvironmentSettings,
    /// Severity that drove the correction
    pub severity: f64,
    /// When the adjustment was applied
    pub timestamp: DateTime<Utc>,
}

/// Result of a manual override of one setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualAdjustment {
    /// Which setting changed
    pub setting: SettingKey,
    /// Value before the override
    pub old_value: f64,
    /// Clamped value after the override
    pub new_value: f64,
    /// When the override was applied
    pub timestamp: DateTime<Utc>,
}

/// Controller for the per-session environment settings.
#[derive(Debug, Default)]
pub struct EnvironmentController {
    settings: EnvironmentSettings,
    preferences: HashMap<SettingKey, f64>,
    adjustment_history: Vec<EnvironmentAdjustment>,
}

impl EnvironmentController {
    /// Controller with default (0.5) settings and no preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user preference map. Values are clamped at write time and
    /// take absolute precedence over automatic correction, key by key.
    pub fn set_preferences(&mut self, preferences: HashMap<SettingKey, f64>) {
        self.preferences = preferences
            .into_iter()
            .map(|(k, v)| (k, v.clamp(0.0, 1.0)))
            .collect();
        tracing::info!(preferences = ?self.preferences, "updated user preferences");
    }

    /// Apply an automatic correction for a detected overload.
    ///
    /// A no-op (previous settings, `adjusted = false`) unless the assessment
    /// detected overload. The correction factor is `min(0.3, severity * 0.5)`
    /// subtracted from lighting, volume, and visual complexity, each floored
    /// asymmetrically; temperature is untouched. Preference keys then
    /// overwrite the corrected values outright.
    pub fn adjust(&mut self, assessment: &OverloadAssessment) -> EnvironmentAdjustment {
        if !assessment.detected {
            return EnvironmentAdjustment {
                adjusted: false,
                previous_settings: self.settings,
                new_settings: self.settings,
                severity: assessment.severity,
                timestamp: Utc::now(),
            };
        }

        let factor = (assessment.severity * 0.5).min(MAX_ADJUSTMENT);
        let previous = self.settings;
        let mut new_settings = self.settings;

        for key in [SettingKey::Lighting, SettingKey::Volume, SettingKey::VisualComplexity] {
            // auto_floor is Some for every auto-adjusted key
            if let Some(floor) = key.auto_floor() {
                new_settings.set(key, (previous.get(key) - factor).max(floor));
            }
        }

        for (&key, &value) in &self.preferences {
            new_settings.set(key, value);
        }

        let adjustment = EnvironmentAdjustment {
            adjusted: true,
            previous_settings: previous,
            new_settings,
            severity: assessment.severity,
            timestamp: Utc::now(),
        };

        self.settings = new_settings;
        self.adjustment_history.push(adjustment.clone());
        adjustment
    }

    /// Manually override one setting. The value is clamped to [0, 1]; the
    /// old and new values are returned.
    pub fn manual_adjustment(
        &mut self,
        setting: SettingKey,
        value: f64,
    ) -> Result<ManualAdjustment, EngineError> {
        let old_value = self.settings.get(setting);
        let new_value = value.clamp(0.0, 1.0);
        self.settings.set(setting, new_value);

        Ok(ManualAdjustment {
            setting,
            old_value,
            new_value,
            timestamp: Utc::now(),
        })
    }

    /// Current settings snapshot.
    pub fn current_settings(&self) -> EnvironmentSettings {
        self.settings
    }

    /// All automatic adjustments this session, oldest first.
    pub fn adjustment_history(&self) -> &[EnvironmentAdjustment] {
        &self.adjustment_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OverloadAssessment;

    fn detected_assessment(overwhelming: usize, total: usize) -> OverloadAssessment {
        OverloadAssessment::new(overwhelming, total, true, Vec::new())
    }

    #[test]
    fn test_no_adjustment_without_detection() {
        let mut controller = EnvironmentController::new();
        let assessment = OverloadAssessment::new(2, 10, false, Vec::new());

        let adjustment = controller.adjust(&assessment);
        assert!(!adjustment.adjusted);
        assert_eq!(adjustment.new_settings, EnvironmentSettings::default());
        assert!(controller.adjustment_history().is_empty());
    }

    #[test]
    fn test_adjustment_factor_is_capped() {
        let mut controller = EnvironmentController::new();
        // severity 1.0 -> factor min(0.3, 0.5) = 0.3
        let adjustment = controller.adjust(&detected_assessment(10, 10));

        assert!(adjustment.adjusted);
        assert!((adjustment.new_settings.lighting - 0.2).abs() < 1e-9);
        assert!((adjustment.new_settings.volume - 0.2).abs() < 1e-9);
        assert!((adjustment.new_settings.visual_complexity - 0.2).abs() < 1e-9);
        // temperature never auto-adjusted
        assert!((adjustment.new_settings.temperature - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_floors_hold_under_repeated_corrections() {
        let mut controller = EnvironmentController::new();
        for _ in 0..10 {
            controller.adjust(&detected_assessment(10, 10));
        }

        let settings = controller.current_settings();
        assert!((settings.lighting - 0.2).abs() < 1e-9);
        assert!((settings.volume - 0.1).abs() < 1e-9);
        assert!((settings.visual_complexity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_preference_overrides_correction_outright() {
        let mut controller = EnvironmentController::new();
        let mut prefs = HashMap::new();
        prefs.insert(SettingKey::Lighting, 0.9);
        controller.set_preferences(prefs);

        let adjustment = controller.adjust(&detected_assessment(10, 10));
        // not a blend: exactly the preference value
        assert!((adjustment.new_settings.lighting - 0.9).abs() < 1e-9);
        // non-preference keys still corrected
        assert!((adjustment.new_settings.volume - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_manual_adjustment_clamps_and_round_trips() {
        let mut controller = EnvironmentController::new();
        let result = controller.manual_adjustment(SettingKey::Volume, 1.7).unwrap();

        assert_eq!(result.setting, SettingKey::Volume);
        assert!((result.old_value - 0.5).abs() < 1e-9);
        assert!((result.new_value - 1.0).abs() < 1e-9);
        assert!((controller.current_settings().volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_setting_key_rejected_at_parse() {
        let err = "brightness".parse::<SettingKey>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownSetting(ref name) if name == "brightness"));
        assert_eq!("visual_complexity".parse::<SettingKey>().unwrap(), SettingKey::VisualComplexity);
    }

    #[test]
    fn test_adjustment_history_snapshots() {
        let mut controller = EnvironmentController::new();
        controller.adjust(&detected_assessment(8, 10));

        let history = controller.adjustment_history();
        assert_eq!(history.len(), 1);
        assert!((history[0].previous_settings.lighting - 0.5).abs() < 1e-9);
        assert!(history[0].new_settings.lighting < 0.5);
    }
}

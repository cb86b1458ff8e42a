//! Input normalization for raw modality signals.
//!
//! Converts raw pixel buffers, audio sample buffers, and tactile scalars into
//! unit-interval [`SensoryReading`]s and appends them to the session history.
//! Malformed input (empty buffers, non-finite samples) is an explicit error,
//! never a reading — a failed normalization must not masquerade as "calm".

use crate::domain::{Modality, ReadingHistory, SensoryReading};
use crate::EngineError;

/// Floor added to RMS before the log to avoid log(0).
const RMS_EPSILON: f64 = 1e-10;

/// Assumed audio operating range in decibels, rescaled linearly to [0, 1].
const DB_FLOOR: f64 = -60.0;

/// Per-modality overwhelm thresholds and history sizing.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Visual intensity/contrast threshold
    pub visual_threshold: f64,
    /// Audio volume threshold
    pub audio_threshold: f64,
    /// Tactile combined-intensity threshold
    pub tactile_threshold: f64,
    /// Readings retained in the session history
    pub history_capacity: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            visual_threshold: 0.7,
            audio_threshold: 0.6,
            tactile_threshold: 0.5,
            history_capacity: crate::domain::history::DEFAULT_CAPACITY,
        }
    }
}

/// Normalizes raw modality signals into readings and records them.
#[derive(Debug)]
pub struct Normalizer {
    config: NormalizerConfig,
    history: ReadingHistory,
}

impl Normalizer {
    /// Create a normalizer with the given thresholds.
    pub fn new(config: NormalizerConfig) -> Self {
        let history = ReadingHistory::with_capacity(config.history_capacity);
        Self { config, history }
    }

    /// Create with default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    /// Normalize a visual frame into a reading.
    ///
    /// Intensity is the mean sample value, divided by 255 when the buffer is
    /// in a 0-255 range. Contrast is the standard deviation scaled by 128 and
    /// clamped to 1. Either exceeding the visual threshold marks the reading
    /// overwhelming.
    pub fn analyze_visual(&mut self, pixels: &[f64]) -> Result<SensoryReading, EngineError> {
        if pixels.is_empty() {
            return Err(EngineError::EmptySignal { modality: Modality::Visual });
        }

        let brightness = mean(pixels);
        let contrast = std_dev(pixels, brightness);
        if !brightness.is_finite() || !contrast.is_finite() {
            return Err(EngineError::Computation(
                "non-finite sample in visual buffer".into(),
            ));
        }

        let brightness_normalized = if brightness > 1.0 { brightness / 255.0 } else { brightness };
        let contrast_normalized = (contrast / 128.0).min(1.0);

        let is_overwhelming = brightness_normalized > self.config.visual_threshold
            || contrast_normalized > self.config.visual_threshold;

        let reading = SensoryReading::new(
            Modality::Visual,
            brightness_normalized,
            contrast_normalized,
            is_overwhelming,
        );
        self.history.push(reading.clone());
        Ok(reading)
    }

    /// Normalize an audio sample buffer into a reading.
    ///
    /// Intensity is RMS energy in decibels rescaled over the -60..0 dB range
    /// and clamped to [0, 1]. The raw decibel value is kept as the secondary
    /// metric.
    pub fn analyze_audio(
        &mut self,
        samples: &[f64],
        _sample_rate: u32,
    ) -> Result<SensoryReading, EngineError> {
        if samples.is_empty() {
            return Err(EngineError::EmptySignal { modality: Modality::Audio });
        }

        let mean_square = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
        if !mean_square.is_finite() {
            return Err(EngineError::Computation(
                "non-finite sample in audio buffer".into(),
            ));
        }

        let rms = mean_square.sqrt();
        let volume_db = 20.0 * (rms + RMS_EPSILON).log10();
        let volume_normalized = ((volume_db - DB_FLOOR) / -DB_FLOOR).clamp(0.0, 1.0);

        let is_overwhelming = volume_normalized > self.config.audio_threshold;

        let reading = SensoryReading::new(
            Modality::Audio,
            volume_normalized,
            volume_db,
            is_overwhelming,
        );
        self.history.push(reading.clone());
        Ok(reading)
    }

    /// Normalize tactile scalars into a reading.
    ///
    /// Pressure and temperature arrive pre-normalized by the caller and are
    /// clamped to [0, 1] here; intensity is their mean.
    pub fn analyze_tactile(
        &mut self,
        pressure: f64,
        temperature: f64,
        texture: &str,
    ) -> Result<SensoryReading, EngineError> {
        if !pressure.is_finite() || !temperature.is_finite() {
            return Err(EngineError::Computation(
                "non-finite tactile scalar".into(),
            ));
        }

        let pressure = pressure.clamp(0.0, 1.0);
        let temperature = temperature.clamp(0.0, 1.0);
        let combined_intensity = (pressure + temperature) / 2.0;

        let is_overwhelming = combined_intensity > self.config.tactile_threshold;

        let reading = SensoryReading::new(
            Modality::Tactile,
            combined_intensity,
            combined_intensity,
            is_overwhelming,
        )
        .with_texture(texture);
        self.history.push(reading.clone());
        Ok(reading)
    }

    /// The last `limit` readings, oldest first.
    pub fn recent_history(&self, limit: usize) -> Vec<SensoryReading> {
        self.history.window(limit)
    }

    /// The full retained history.
    pub fn history(&self) -> &ReadingHistory {
        &self.history
    }

    /// Active configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn std_dev(samples: &[f64], mean: f64) -> f64 {
    let variance =
        samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_range_detection() {
        let mut normalizer = Normalizer::with_defaults();

        // 0-255 range buffer gets divided down
        let bright = vec![250.0; 64];
        let reading = normalizer.analyze_visual(&bright).unwrap();
        assert!((reading.intensity.value() - 250.0 / 255.0).abs() < 1e-9);
        assert!(reading.is_overwhelming);

        // Already-normalized buffer passes through
        let dim = vec![0.3; 64];
        let reading = normalizer.analyze_visual(&dim).unwrap();
        assert!((reading.intensity.value() - 0.3).abs() < 1e-9);
        assert!(!reading.is_overwhelming);
    }

    #[test]
    fn test_visual_contrast_triggers_overwhelm() {
        let mut normalizer = Normalizer::with_defaults();

        // Alternating extremes: mean 127.5 -> ~0.5 brightness, std 127.5 ->
        // contrast ~0.996, above the 0.7 threshold
        let checker: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 0.0 } else { 255.0 }).collect();
        let reading = normalizer.analyze_visual(&checker).unwrap();
        assert!(reading.secondary > 0.9);
        assert!(reading.is_overwhelming);
    }

    #[test]
    fn test_audio_db_rescaling() {
        let mut normalizer = Normalizer::with_defaults();

        // Full-scale square wave: rms = 1.0 -> 0 dB -> normalized 1.0
        let loud = vec![1.0; 1024];
        let reading = normalizer.analyze_audio(&loud, 44_100).unwrap();
        assert!((reading.intensity.value() - 1.0).abs() < 1e-6);
        assert!(reading.is_overwhelming);

        // Near-silence clamps to 0
        let quiet = vec![1e-6; 1024];
        let reading = normalizer.analyze_audio(&quiet, 44_100).unwrap();
        assert_eq!(reading.intensity.value(), 0.0);
        assert!(!reading.is_overwhelming);
    }

    #[test]
    fn test_tactile_combined_intensity() {
        let mut normalizer = Normalizer::with_defaults();

        let reading = normalizer.analyze_tactile(0.8, 0.6, "rough").unwrap();
        assert!((reading.intensity.value() - 0.7).abs() < 1e-9);
        assert!(reading.is_overwhelming);
        assert_eq!(reading.texture.as_deref(), Some("rough"));

        let reading = normalizer.analyze_tactile(0.2, 0.2, "smooth").unwrap();
        assert!(!reading.is_overwhelming);
    }

    #[test]
    fn test_tactile_clamps_out_of_range_input() {
        let mut normalizer = Normalizer::with_defaults();
        let reading = normalizer.analyze_tactile(3.0, -1.0, "smooth").unwrap();
        assert!((reading.intensity.value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_buffers_are_errors_not_calm_readings() {
        let mut normalizer = Normalizer::with_defaults();

        assert!(matches!(
            normalizer.analyze_visual(&[]),
            Err(EngineError::EmptySignal { modality: Modality::Visual })
        ));
        assert!(matches!(
            normalizer.analyze_audio(&[], 44_100),
            Err(EngineError::EmptySignal { modality: Modality::Audio })
        ));
        // Failed normalization leaves no data point behind
        assert!(normalizer.history().is_empty());
    }

    #[test]
    fn test_readings_append_to_history() {
        let mut normalizer = Normalizer::with_defaults();
        normalizer.analyze_tactile(0.5, 0.5, "smooth").unwrap();
        normalizer.analyze_visual(&[0.4; 16]).unwrap();

        assert_eq!(normalizer.history().len(), 2);
        let recent = normalizer.recent_history(10);
        assert_eq!(recent[0].modality, Modality::Tactile);
        assert_eq!(recent[1].modality, Modality::Visual);
    }
}

//! Bounded, insertion-ordered reading history.

use std::collections::VecDeque;

use super::reading::SensoryReading;

/// Default number of readings retained per session.
pub const DEFAULT_CAPACITY: usize = 256;

/// Ring buffer of the most recent readings for one session.
///
/// Insertion order is significant. The buffer self-prunes at `capacity`, and
/// detection reads through the explicit [`window`](Self::window) accessor
/// rather than slicing the full log.
#[derive(Debug, Clone)]
pub struct ReadingHistory {
    readings: VecDeque<SensoryReading>,
    capacity: usize,
    total_pushed: u64,
}

impl ReadingHistory {
    /// Create a history bounded at `capacity` readings (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            readings: VecDeque::new(),
            capacity: capacity.max(1),
            total_pushed: 0,
        }
    }

    /// Append a reading, evicting the oldest when at capacity.
    pub fn push(&mut self, reading: SensoryReading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
        self.total_pushed += 1;
    }

    /// The last `n` readings in insertion order (oldest first). Returns
    /// fewer than `n` when the history is shorter.
    pub fn window(&self, n: usize) -> Vec<SensoryReading> {
        let skip = self.readings.len().saturating_sub(n);
        self.readings.iter().skip(skip).cloned().collect()
    }

    /// Every retained reading, oldest first.
    pub fn all(&self) -> impl Iterator<Item = &SensoryReading> {
        self.readings.iter()
    }

    /// Number of readings currently retained.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the history holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Total readings ever pushed, including evicted ones.
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }
}

impl Default for ReadingHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Modality;

    fn reading(intensity: f64) -> SensoryReading {
        SensoryReading::new(Modality::Audio, intensity, 0.0, false)
    }

    #[test]
    fn test_window_returns_most_recent_in_order() {
        let mut history = ReadingHistory::with_capacity(10);
        for i in 0..5 {
            history.push(reading(i as f64 / 10.0));
        }

        let window = history.window(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].intensity.value(), 0.2);
        assert_eq!(window[2].intensity.value(), 0.4);
    }

    #[test]
    fn test_window_larger_than_history() {
        let mut history = ReadingHistory::with_capacity(10);
        history.push(reading(0.5));
        assert_eq!(history.window(10).len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = ReadingHistory::with_capacity(3);
        for i in 0..5 {
            history.push(reading(i as f64 / 10.0));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.total_pushed(), 5);
        let all: Vec<_> = history.all().collect();
        assert_eq!(all[0].intensity.value(), 0.2);
    }
}

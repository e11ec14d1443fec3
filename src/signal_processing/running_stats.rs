use serde::Serialize;

use crate::constants::STATISTICS_DECAY;

/// Mean and RMS estimate after one update
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatisticsSnapshot {
    pub mean: f32,
    pub rms: f32,
}

/// Exponentially weighted running mean and RMS amplitude
///
/// Tracks slow drift in signal level with O(1) memory and cost per sample.
/// Each update blends the new sample in with weight `λ` (`STATISTICS_DECAY`):
///
/// ```text
/// mean = (1 - λ)·mean + λ·x
/// rms  = sqrt((1 - λ)·rms² + λ·(x - mean)²)
/// ```
///
/// The RMS is taken around the freshly updated mean. Both estimates start at
/// zero. A NaN sample turns both estimates into NaN for the rest of the
/// instance's life; this is how bad upstream data becomes visible.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStatistics {
    decay: f32,
    mean: f32,
    rms: f32,
}

impl RunningStatistics {
    pub fn new() -> Self {
        Self {
            decay: STATISTICS_DECAY,
            mean: 0.0,
            rms: 0.0,
        }
    }

    /// Fold one sample into the estimates and return the updated values
    pub fn update(&mut self, sample: f32) -> StatisticsSnapshot {
        let keep = 1.0 - self.decay;
        self.mean = keep * self.mean + self.decay * sample;

        let deviation = sample - self.mean;
        self.rms = (keep * self.rms * self.rms + self.decay * deviation * deviation).sqrt();

        self.snapshot()
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            mean: self.mean,
            rms: self.rms,
        }
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn rms(&self) -> f32 {
        self.rms
    }

    /// True once a non-finite sample has reached the estimates
    pub fn is_poisoned(&self) -> bool {
        !self.mean.is_finite() || !self.rms.is_finite()
    }

    pub fn reset(&mut self) {
        self.mean = 0.0;
        self.rms = 0.0;
    }
}

impl Default for RunningStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_update_matches_recurrence() {
        let mut stats = RunningStatistics::new();
        let snapshot = stats.update(10.0);

        let mean = 0.005 * 10.0;
        let rms = (0.005 * (10.0f32 - mean).powi(2)).sqrt();
        assert_abs_diff_eq!(snapshot.mean, mean, epsilon = 1e-6);
        assert_abs_diff_eq!(snapshot.rms, rms, epsilon = 1e-6);
        assert_eq!(snapshot, stats.snapshot());
    }

    #[test]
    fn test_constant_input_converges() {
        let mut stats = RunningStatistics::new();
        for _ in 0..2000 {
            stats.update(10.0);
        }
        assert_abs_diff_eq!(stats.mean(), 10.0, epsilon = 0.01);
        // rms decays as 0.995^(n/2), slower than the mean
        assert!(stats.rms() < 0.1, "rms should decay to ~0, got {}", stats.rms());
    }

    #[test]
    fn test_square_wave_rms() {
        // ±A around zero: mean stays near 0 and rms settles near A
        let mut stats = RunningStatistics::new();
        for i in 0..4000 {
            let x = if i % 2 == 0 { 20.0 } else { -20.0 };
            stats.update(x);
        }
        assert_abs_diff_eq!(stats.mean(), 0.0, epsilon = 0.2);
        assert_abs_diff_eq!(stats.rms(), 20.0, epsilon = 0.5);
    }

    #[test]
    fn test_estimates_stay_finite() {
        let mut stats = RunningStatistics::new();
        for i in 0..100_000 {
            let x = ((i * 7919) % 2001) as f32 - 1000.0;
            let snapshot = stats.update(x);
            assert!(snapshot.mean.is_finite() && snapshot.rms.is_finite());
        }
        assert!(!stats.is_poisoned());
    }

    #[test]
    fn test_nan_poisons_permanently() {
        let mut stats = RunningStatistics::new();
        stats.update(1.0);
        let snapshot = stats.update(f32::NAN);
        assert!(snapshot.mean.is_nan());
        assert!(snapshot.rms.is_nan());

        for _ in 0..1000 {
            let snapshot = stats.update(1.0);
            assert!(snapshot.mean.is_nan() && snapshot.rms.is_nan());
        }
        assert!(stats.is_poisoned());

        stats.reset();
        assert_eq!(stats, RunningStatistics::new());
    }

    #[test]
    fn test_infinity_poisons() {
        let mut stats = RunningStatistics::new();
        stats.update(f32::INFINITY);
        assert!(stats.is_poisoned());
    }
}

use serde::Serialize;

use crate::config::FilterMode;
use crate::error::Result;
use crate::signal_processing::{BandpassFilter, RunningStatistics};

/// Output of one channel for one input sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProcessedRecord {
    /// Sample after the optional bandpass, for plotting
    pub filtered_amplitude: f32,
    /// Running mean of the (possibly filtered) amplitude
    pub mean: f32,
    /// Running RMS of the (possibly filtered) amplitude around the mean
    pub rms: f32,
}

/// Per-channel processing: optional bandpass followed by running statistics
///
/// Each pipeline owns its filter and statistics exclusively, so channels can
/// be driven independently (including from separate threads).
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPipeline {
    filter: BandpassFilter,
    statistics: RunningStatistics,
}

impl ChannelPipeline {
    /// Create a channel pipeline with a fresh bandpass filter
    ///
    /// # Errors
    /// Returns `EegError::Config` if the band is invalid for the sample rate
    pub fn new(sample_rate: f32, low_hz: f32, high_hz: f32) -> Result<Self> {
        Ok(Self {
            filter: BandpassFilter::new(sample_rate, low_hz, high_hz)?,
            statistics: RunningStatistics::new(),
        })
    }

    /// Process one sample
    ///
    /// Samples are filtered only when `mode` enables it and the sample is
    /// finite; otherwise the sample passes through and the filter state is
    /// left untouched. The statistics always see the resulting amplitude, so
    /// a NaN or infinite sample poisons them in either mode.
    pub fn process(&mut self, sample: f32, mode: FilterMode) -> ProcessedRecord {
        let amplitude = if mode.is_enabled() && sample.is_finite() {
            self.filter.process(sample)
        } else {
            sample
        };

        let stats = self.statistics.update(amplitude);

        ProcessedRecord {
            filtered_amplitude: amplitude,
            mean: stats.mean,
            rms: stats.rms,
        }
    }

    pub fn filter(&self) -> &BandpassFilter {
        &self.filter
    }

    pub fn statistics(&self) -> &RunningStatistics {
        &self.statistics
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.statistics.reset();
    }
}

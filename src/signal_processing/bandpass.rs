use super::filter::Filter;
use super::one_pole::OnePoleFilter;
use crate::config::validate_band;
use crate::error::Result;

/// First-order bandpass built from two cascaded one-pole stages
///
/// The high-pass stage (at the low corner) runs first and removes electrode
/// drift and DC offset; its output feeds the low-pass stage (at the high
/// corner). The order is part of the response and must not be swapped.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassFilter {
    high_pass: OnePoleFilter,
    low_pass: OnePoleFilter,
}

impl BandpassFilter {
    /// Create a new bandpass filter
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `low_hz` - Lower corner in Hz (high-pass stage)
    /// * `high_hz` - Upper corner in Hz (low-pass stage)
    ///
    /// # Errors
    /// Returns `EegError::Config` unless `0 < low_hz < high_hz < sample_rate / 2`
    pub fn new(sample_rate: f32, low_hz: f32, high_hz: f32) -> Result<Self> {
        validate_band(sample_rate, low_hz, high_hz)?;

        Ok(Self {
            high_pass: OnePoleFilter::high_pass(sample_rate, low_hz)?,
            low_pass: OnePoleFilter::low_pass(sample_rate, high_hz)?,
        })
    }

    /// Filter single sample
    pub fn process(&mut self, sample: f32) -> f32 {
        let high_passed = self.high_pass.process(sample);
        self.low_pass.process(high_passed)
    }

    pub fn reset(&mut self) {
        self.high_pass.reset();
        self.low_pass.reset();
    }

    pub fn high_pass(&self) -> &OnePoleFilter {
        &self.high_pass
    }

    pub fn low_pass(&self) -> &OnePoleFilter {
        &self.low_pass
    }
}

impl Filter for BandpassFilter {
    fn process(&mut self, sample: f32) -> f32 {
        BandpassFilter::process(self, sample)
    }

    fn reset(&mut self) {
        BandpassFilter::reset(self)
    }
}

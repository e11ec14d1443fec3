use std::f32::consts::PI;

use super::filter::Filter;
use crate::config::validate_corner;
use crate::error::Result;

/// Response of a single one-pole stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Smooths toward the input, attenuating content above the corner
    LowPass,
    /// Responds to sample-to-sample change only, so DC decays to zero
    HighPass,
}

/// First-order recursive (one-pole IIR) filter stage
///
/// Both kinds share one coefficient `α = ω / (ω + 1)` with `ω = 2π·fc/fs`:
///
/// ```text
/// low-pass:   y[n] = α·x[n] + (1 - α)·y[n-1]
/// high-pass:  y[n] = α·(y[n-1] + x[n] - x[n-1])
/// ```
///
/// With a small `α` the high-pass gain is small at every frequency and grows
/// with frequency; a step decays by a factor `α` per sample.
///
/// Both recurrences start from `x[-1] = y[-1] = 0`, so the first output is
/// `α·x[0]` and the first few outputs carry a settling transient.
///
/// Input is not validated: a NaN or infinite sample is stored in the state
/// and poisons every later output until `reset` is called.
#[derive(Debug, Clone, PartialEq)]
pub struct OnePoleFilter {
    kind: FilterKind,
    alpha: f32,
    prev_input: f32,
    prev_output: f32,
}

impl OnePoleFilter {
    /// Create a new one-pole stage
    ///
    /// # Arguments
    /// * `kind` - Low-pass or high-pass response
    /// * `sample_rate` - Sample rate in Hz
    /// * `corner_hz` - Corner frequency in Hz, strictly between 0 and Nyquist
    ///
    /// # Errors
    /// Returns `EegError::Config` if the sample rate or corner is out of range
    pub fn new(kind: FilterKind, sample_rate: f32, corner_hz: f32) -> Result<Self> {
        validate_corner(sample_rate, corner_hz)?;

        let omega = 2.0 * PI * corner_hz / sample_rate;
        let alpha = omega / (omega + 1.0);

        Ok(Self {
            kind,
            alpha,
            prev_input: 0.0,
            prev_output: 0.0,
        })
    }

    pub fn low_pass(sample_rate: f32, corner_hz: f32) -> Result<Self> {
        Self::new(FilterKind::LowPass, sample_rate, corner_hz)
    }

    pub fn high_pass(sample_rate: f32, corner_hz: f32) -> Result<Self> {
        Self::new(FilterKind::HighPass, sample_rate, corner_hz)
    }

    /// Advance the stage by one sample and return the new output
    pub fn process(&mut self, sample: f32) -> f32 {
        let output = match self.kind {
            FilterKind::LowPass => self.alpha * sample + (1.0 - self.alpha) * self.prev_output,
            FilterKind::HighPass => self.alpha * (self.prev_output + sample - self.prev_input),
        };
        self.prev_input = sample;
        self.prev_output = output;
        output
    }

    pub fn reset(&mut self) {
        self.prev_input = 0.0;
        self.prev_output = 0.0;
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Smoothing coefficient derived from the corner frequency
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Most recent output, zero before the first sample
    pub fn last_output(&self) -> f32 {
        self.prev_output
    }
}

impl Filter for OnePoleFilter {
    fn process(&mut self, sample: f32) -> f32 {
        OnePoleFilter::process(self, sample)
    }

    fn reset(&mut self) {
        OnePoleFilter::reset(self)
    }
}

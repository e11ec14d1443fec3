//! Configuration for the EEG stream processor.
//!
//! ## Loading from TOML
//!
//! Every field is optional in a file; missing fields take the defaults of
//! the four-channel headset (256 Hz, 1-30 Hz passband, filter bypassed):
//!
//! ```
//! use eegstream::config::{FilterMode, ProcessorConfig};
//!
//! let config = ProcessorConfig::from_toml_str(
//!     r#"
//!     channel_count = 8
//!     high_corner_hz = 40.0
//!     filter_mode = "bandpass"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.channel_count, 8);
//! assert_eq!(config.filter_mode, FilterMode::Bandpass);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHANNEL_COUNT, DEFAULT_CHANNEL_NAMES, DEFAULT_HIGH_CORNER_HZ, DEFAULT_LOW_CORNER_HZ,
    DEFAULT_SAMPLE_RATE_HZ,
};
use crate::error::{EegError, Result};

/// Whether samples pass through the bandpass filter
///
/// Consulted once per sample at the channel pipeline boundary. While
/// bypassed, raw samples feed the running statistics directly and the filter
/// state stays frozen until filtering is enabled again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Raw samples pass through unchanged
    #[default]
    Bypass,
    /// Samples are bandpass filtered before statistics
    Bandpass,
}

impl FilterMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, FilterMode::Bandpass)
    }
}

impl From<bool> for FilterMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            FilterMode::Bandpass
        } else {
            FilterMode::Bypass
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Bypass => write!(f, "bypass"),
            FilterMode::Bandpass => write!(f, "bandpass"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bypass" | "off" | "raw" => Ok(FilterMode::Bypass),
            "bandpass" | "on" | "filter" => Ok(FilterMode::Bandpass),
            other => Err(format!("invalid filter mode: {}", other)),
        }
    }
}

/// Stream processor configuration
///
/// Use `ProcessorConfig::default()` for the four-channel headset defaults.
/// The channel count, sample rate and corner frequencies are fixed once a
/// processor is built from this; `filter_mode` is only the starting mode and
/// may be overridden on every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Number of channels in every sample frame
    pub channel_count: usize,
    /// Nominal sample rate in Hz
    pub sample_rate_hz: f32,
    /// High-pass corner in Hz (lower edge of the passband)
    pub low_corner_hz: f32,
    /// Low-pass corner in Hz (upper edge of the passband)
    pub high_corner_hz: f32,
    /// Initial filter mode
    pub filter_mode: FilterMode,
    /// Optional electrode labels, in frame order
    pub channel_names: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            channel_count: DEFAULT_CHANNEL_COUNT,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            low_corner_hz: DEFAULT_LOW_CORNER_HZ,
            high_corner_hz: DEFAULT_HIGH_CORNER_HZ,
            filter_mode: FilterMode::default(),
            channel_names: Vec::new(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check the invariants every processor relies on
    ///
    /// # Errors
    /// Returns `EegError::Config` if the sample rate is not a positive finite
    /// number, the channel count is zero, the corners are not ordered
    /// `0 < low < high < sample_rate / 2`, or more names than channels are given.
    pub fn validate(&self) -> Result<()> {
        if self.channel_count == 0 {
            return Err(EegError::Config("channel count must be positive".into()));
        }
        validate_band(self.sample_rate_hz, self.low_corner_hz, self.high_corner_hz)?;
        if self.channel_names.len() > self.channel_count {
            return Err(EegError::Config(format!(
                "{} channel names given for {} channels",
                self.channel_names.len(),
                self.channel_count
            )));
        }
        Ok(())
    }

    /// Display label for a channel index
    pub fn channel_label(&self, index: usize) -> String {
        if let Some(name) = self.channel_names.get(index) {
            return name.clone();
        }
        match DEFAULT_CHANNEL_NAMES.get(index) {
            Some(name) if self.channel_count == DEFAULT_CHANNEL_COUNT => (*name).to_string(),
            _ => format!("ch{}", index),
        }
    }

    /// Labels for every channel, in frame order
    pub fn channel_labels(&self) -> Vec<String> {
        (0..self.channel_count)
            .map(|i| self.channel_label(i))
            .collect()
    }
}

pub(crate) fn validate_sample_rate(sample_rate_hz: f32) -> Result<()> {
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(EegError::Config(format!(
            "sample rate must be positive, got {} Hz",
            sample_rate_hz
        )));
    }
    Ok(())
}

pub(crate) fn validate_corner(sample_rate_hz: f32, corner_hz: f32) -> Result<()> {
    validate_sample_rate(sample_rate_hz)?;
    let nyquist = sample_rate_hz / 2.0;
    if !(corner_hz > 0.0 && corner_hz < nyquist) {
        return Err(EegError::Config(format!(
            "corner frequency {} Hz must lie between 0 and {} Hz",
            corner_hz, nyquist
        )));
    }
    Ok(())
}

pub(crate) fn validate_band(sample_rate_hz: f32, low_hz: f32, high_hz: f32) -> Result<()> {
    validate_corner(sample_rate_hz, low_hz)?;
    validate_corner(sample_rate_hz, high_hz)?;
    if low_hz >= high_hz {
        return Err(EegError::Config(format!(
            "low corner {} Hz must be below high corner {} Hz",
            low_hz, high_hz
        )));
    }
    Ok(())
}

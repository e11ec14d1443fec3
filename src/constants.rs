//! Defaults and fixed constants for the EEG processing pipeline

/// Nominal headset sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 256.0;

/// Number of scalp electrodes on the default headset.
pub const DEFAULT_CHANNEL_COUNT: usize = 4;

/// Lower bandpass corner in Hz. Removes electrode drift and DC offset.
pub const DEFAULT_LOW_CORNER_HZ: f32 = 1.0;

/// Upper bandpass corner in Hz. Removes mains hum and muscle artifacts.
pub const DEFAULT_HIGH_CORNER_HZ: f32 = 30.0;

/// Weight of the newest sample in the running mean and RMS estimates.
/// The prior estimate is weighted by `1.0 - STATISTICS_DECAY`.
pub const STATISTICS_DECAY: f32 = 0.005;

/// Electrode labels of the default four-channel headset, in frame order.
pub const DEFAULT_CHANNEL_NAMES: [&str; DEFAULT_CHANNEL_COUNT] = ["TP9", "AF7", "AF8", "TP10"];

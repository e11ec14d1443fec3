use std::f32::consts::PI;

/// Sinusoidal brain rhythm in every channel
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Rhythm {
    pub frequency_hz: f32,
    /// Peak amplitude in microvolts
    pub amplitude_uv: f32,
}

/// Synthetic multichannel EEG recording
///
/// Each channel is the sum of the configured rhythms plus electrode DC offset,
/// linear drift and mains hum. Channel `c` has its rhythms phase-shifted by
/// `0.7·c` radians and its DC offset scaled by `c + 1` so channels differ.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SyntheticEegConfig {
    pub channel_count: usize,
    pub sample_rate_hz: f32,
    pub duration_secs: f32,
    pub rhythms: Vec<Rhythm>,
    pub dc_offset_uv: f32,
    pub drift_uv_per_sec: f32,
    pub mains_hz: f32,
    pub mains_amplitude_uv: f32,
    /// Standard deviation of additive Gaussian noise in microvolts
    pub noise_std_uv: f32,
    pub seed: Option<u64>,
}

impl Default for SyntheticEegConfig {
    fn default() -> Self {
        Self {
            channel_count: 4,
            sample_rate_hz: 256.0,
            duration_secs: 10.0,
            rhythms: vec![
                // Alpha
                Rhythm {
                    frequency_hz: 10.0,
                    amplitude_uv: 40.0,
                },
                // Beta
                Rhythm {
                    frequency_hz: 20.0,
                    amplitude_uv: 10.0,
                },
            ],
            dc_offset_uv: 800.0,
            drift_uv_per_sec: 5.0,
            mains_hz: 50.0,
            mains_amplitude_uv: 30.0,
            noise_std_uv: 5.0,
            seed: None,
        }
    }
}

impl SyntheticEegConfig {
    pub fn frame_count(&self) -> usize {
        (self.duration_secs * self.sample_rate_hz) as usize
    }
}

/// Generate the noise-free recording as interleaved frames
pub fn generate_clean_eeg(config: &SyntheticEegConfig) -> Vec<f32> {
    let num_frames = config.frame_count();
    let mut samples = Vec::with_capacity(num_frames * config.channel_count);

    for i in 0..num_frames {
        let t = i as f32 / config.sample_rate_hz;
        let mains = config.mains_amplitude_uv * (2.0 * PI * config.mains_hz * t).sin();

        for channel in 0..config.channel_count {
            let phase = 0.7 * channel as f32;
            let rhythms: f32 = config
                .rhythms
                .iter()
                .map(|r| r.amplitude_uv * (2.0 * PI * r.frequency_hz * t + phase).sin())
                .sum();
            let offset = config.dc_offset_uv * (channel + 1) as f32;

            samples.push(rhythms + offset + config.drift_uv_per_sec * t + mains);
        }
    }

    samples
}

use std::f32::consts::PI;

/// `num_frames` frames where every channel carries the same constant
#[allow(dead_code)]
pub fn constant_frames(value: f32, channels: usize, num_frames: usize) -> Vec<Vec<f32>> {
    vec![vec![value; channels]; num_frames]
}

/// Frames of per-channel sine waves; channel `c` oscillates at `freqs_hz[c]`
#[allow(dead_code)]
pub fn sine_frames(
    freqs_hz: &[f32],
    amplitude: f32,
    sample_rate: f32,
    num_frames: usize,
) -> Vec<Vec<f32>> {
    (0..num_frames)
        .map(|i| {
            let t = i as f32 / sample_rate;
            freqs_hz
                .iter()
                .map(|f| amplitude * (2.0 * PI * f * t).sin())
                .collect()
        })
        .collect()
}

/// Single-channel tone riding on a DC offset
#[allow(dead_code)]
pub fn tone_with_offset(
    freq_hz: f32,
    amplitude: f32,
    offset: f32,
    sample_rate: f32,
    num_samples: usize,
) -> Vec<f32> {
    (0..num_samples)
        .map(|i| offset + amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

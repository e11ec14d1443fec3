use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::signal::{SyntheticEegConfig, generate_clean_eeg};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Add white Gaussian noise with the given standard deviation in-place
pub fn add_gaussian_noise(signal: &mut [f32], std_dev: f32, seed: Option<u64>) {
    if std_dev <= 0.0 {
        return;
    }

    let mut rng = create_rng(seed);
    let normal = match Normal::new(0.0, std_dev as f64) {
        Ok(normal) => normal,
        Err(_) => return,
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng) as f32;
    }
}

/// Generate a recording including the configured Gaussian noise
pub fn generate_noisy_eeg(config: &SyntheticEegConfig) -> Vec<f32> {
    let mut samples = generate_clean_eeg(config);
    add_gaussian_noise(&mut samples, config.noise_std_uv, config.seed);
    samples
}

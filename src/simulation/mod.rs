mod noise;
mod signal;

pub use noise::{add_gaussian_noise, generate_noisy_eeg};
pub use signal::{Rhythm, SyntheticEegConfig, generate_clean_eeg};

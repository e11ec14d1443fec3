use thiserror::Error;

#[derive(Error, Debug)]
pub enum EegError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Frame shape mismatch: expected {expected} samples, got {actual}")]
    FrameShape { expected: usize, actual: usize },

    #[error("Partial frame: {samples} samples is not a whole number of {channels}-channel frames")]
    PartialFrame { channels: usize, samples: usize },

    #[error("Sample source error: {0}")]
    Source(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EegError>;

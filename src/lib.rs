pub mod channel;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod signal_processing;
pub mod source;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use channel::{ChannelPipeline, ProcessedRecord};
pub use config::{FilterMode, ProcessorConfig};
pub use error::{EegError, Result};
pub use processing::MultiChannelProcessor;
pub use wav::save_wav;

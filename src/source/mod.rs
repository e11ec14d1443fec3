pub mod delimited;
pub mod wav;

pub use delimited::DelimitedSource;
pub use wav::WavFileSource;

use crate::error::Result;

/// Producer of sample frames in chronological order
pub trait SampleSource: Send {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<Vec<f32>>>;

    /// Number of samples in every frame
    fn channel_count(&self) -> usize;
}

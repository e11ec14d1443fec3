use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::WavReader;

use super::SampleSource;
use crate::error::{EegError, Result};

/// Multichannel WAV recording read as sample frames
///
/// Float files are read as-is; integer PCM is normalised to ±1.0.
pub struct WavFileSource {
    samples: Vec<f32>,
    position: usize,
    channel_count: usize,
    sample_rate: u32,
}

impl WavFileSource {
    /// Open a recording whose channel count must equal `channel_count`
    ///
    /// # Errors
    /// Returns `EegError::Wav` if the file cannot be read and
    /// `EegError::Source` if the channel count does not match.
    pub fn new<P: AsRef<Path>>(path: P, channel_count: usize) -> Result<Self> {
        let reader = WavReader::open(path.as_ref())?;
        let spec = reader.spec();

        if spec.channels as usize != channel_count {
            return Err(EegError::Source(format!(
                "expected {} channel WAV file, got {} channels",
                channel_count, spec.channels
            )));
        }

        let sample_rate = spec.sample_rate;
        let samples = Self::read_samples(reader, &spec)?;

        log::debug!(
            "Loaded {} frames at {} Hz from {}",
            samples.len() / channel_count,
            sample_rate,
            path.as_ref().display()
        );

        Ok(Self {
            samples,
            position: 0,
            channel_count,
            sample_rate,
        })
    }

    fn read_samples(
        mut reader: WavReader<BufReader<File>>,
        spec: &hound::WavSpec,
    ) -> Result<Vec<f32>> {
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let max_val = 2_i32.pow(spec.bits_per_sample as u32 - 1) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_val))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of whole frames in the file
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channel_count
    }
}

impl SampleSource for WavFileSource {
    fn next_frame(&mut self) -> Result<Option<Vec<f32>>> {
        let end = self.position + self.channel_count;
        if end > self.samples.len() {
            return Ok(None);
        }

        let frame = self.samples[self.position..end].to_vec();
        self.position = end;

        Ok(Some(frame))
    }

    fn channel_count(&self) -> usize {
        self.channel_count
    }
}

use hound::{WavSpec, WavWriter};

use crate::error::{EegError, Result};

/// Write interleaved multichannel samples as a 32-bit float WAV file
pub fn save_wav(filename: &str, samples: &[f32], channels: u16, sample_rate: u32) -> Result<()> {
    if channels == 0 || samples.len() % channels as usize != 0 {
        return Err(EegError::PartialFrame {
            channels: channels as usize,
            samples: samples.len(),
        });
    }

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(filename, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

use crate::channel::{ChannelPipeline, ProcessedRecord};
use crate::config::{FilterMode, ProcessorConfig};
use crate::error::{EegError, Result};

/// Fans fixed-width sample frames out to independent channel pipelines
///
/// One `ChannelPipeline` exists per channel, indexed in frame order. No state
/// is shared between channels, so the order in which channels are visited
/// has no observable effect.
///
/// # Example
/// ```
/// use eegstream::{FilterMode, MultiChannelProcessor, ProcessorConfig};
///
/// let mut processor = MultiChannelProcessor::new(&ProcessorConfig::default()).unwrap();
/// let records = processor
///     .process_frame(&[12.0, -3.5, 8.25, 0.0], FilterMode::Bandpass)
///     .unwrap();
/// assert_eq!(records.len(), 4);
/// assert!(processor.process_frame(&[1.0, 2.0], FilterMode::Bypass).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MultiChannelProcessor {
    channels: Vec<ChannelPipeline>,
    default_mode: FilterMode,
}

impl MultiChannelProcessor {
    /// Build one pipeline per configured channel
    ///
    /// # Errors
    /// Returns `EegError::Config` if the configuration is invalid; no
    /// processor is produced in that case.
    pub fn new(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;

        let channels = (0..config.channel_count)
            .map(|_| {
                ChannelPipeline::new(
                    config.sample_rate_hz,
                    config.low_corner_hz,
                    config.high_corner_hz,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Created processor: {} channels at {} Hz, passband {}-{} Hz, filter {}",
            config.channel_count,
            config.sample_rate_hz,
            config.low_corner_hz,
            config.high_corner_hz,
            config.filter_mode
        );

        Ok(Self {
            channels,
            default_mode: config.filter_mode,
        })
    }

    /// Process one frame, returning one record per channel in frame order
    ///
    /// # Errors
    /// Returns `EegError::FrameShape` if the frame length differs from the
    /// channel count. No channel state changes in that case.
    pub fn process_frame(
        &mut self,
        frame: &[f32],
        mode: FilterMode,
    ) -> Result<Vec<ProcessedRecord>> {
        self.check_frame_len(frame.len())?;

        Ok(self
            .channels
            .iter_mut()
            .zip(frame)
            .map(|(channel, &sample)| channel.process(sample, mode))
            .collect())
    }

    /// Process a frame with the mode from the configuration
    pub fn process_frame_default(&mut self, frame: &[f32]) -> Result<Vec<ProcessedRecord>> {
        self.process_frame(frame, self.default_mode)
    }

    /// Process interleaved samples `[c0, c1, .., cN-1, c0, c1, ..]`
    ///
    /// Returns one `Vec` of records per frame. A block whose length is not a
    /// whole number of frames is rejected with `EegError::PartialFrame`
    /// before any frame is processed.
    pub fn process_interleaved(
        &mut self,
        interleaved: &[f32],
        mode: FilterMode,
    ) -> Result<Vec<Vec<ProcessedRecord>>> {
        let channel_count = self.channels.len();
        if interleaved.len() % channel_count != 0 {
            log::warn!(
                "Rejected interleaved block of {} samples: trailing partial frame of {}",
                interleaved.len(),
                interleaved.len() % channel_count
            );
            return Err(EegError::PartialFrame {
                channels: channel_count,
                samples: interleaved.len(),
            });
        }

        interleaved
            .chunks_exact(channel_count)
            .map(|frame| self.process_frame(frame, mode))
            .collect()
    }

    fn check_frame_len(&self, actual: usize) -> Result<()> {
        let expected = self.channels.len();
        if actual != expected {
            log::warn!("Rejected frame of {} samples, expected {}", actual, expected);
            return Err(EegError::FrameShape { expected, actual });
        }
        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn default_mode(&self) -> FilterMode {
        self.default_mode
    }

    pub fn set_default_mode(&mut self, mode: FilterMode) {
        self.default_mode = mode;
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelPipeline> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[ChannelPipeline] {
        &self.channels
    }

    /// Hand the pipelines over, e.g. to drive each channel on its own thread
    pub fn into_channels(self) -> Vec<ChannelPipeline> {
        self.channels
    }

    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }
}

use super::{Formatter, FrameOutput};

/// Human-readable line per frame, values rounded to two decimals
pub struct TextFormatter {
    labels: Vec<String>,
}

impl TextFormatter {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &FrameOutput<'_>) -> String {
        let channels: Vec<String> = output
            .records
            .iter()
            .zip(&self.labels)
            .map(|(record, label)| {
                format!(
                    "{}: {:.2} (mean {:.2}, rms {:.2})",
                    label, record.filtered_amplitude, record.mean, record.rms
                )
            })
            .collect();
        format!("#{:>8} {}", output.frame_index, channels.join(" | "))
    }
}

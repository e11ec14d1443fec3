use super::{Formatter, FrameOutput, iso8601_timestamp};

pub struct CsvFormatter {
    labels: Vec<String>,
}

impl CsvFormatter {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, output: &FrameOutput<'_>) -> String {
        let mut fields = vec![iso8601_timestamp(), output.frame_index.to_string()];
        for record in output.records {
            fields.push(record.filtered_amplitude.to_string());
            fields.push(record.mean.to_string());
            fields.push(record.rms.to_string());
        }
        fields.join(",")
    }

    fn header(&self) -> Option<String> {
        let mut columns = vec!["ts".to_string(), "frame".to_string()];
        for label in &self.labels {
            columns.push(format!("{}_amplitude", label));
            columns.push(format!("{}_mean", label));
            columns.push(format!("{}_rms", label));
        }
        Some(columns.join(","))
    }
}

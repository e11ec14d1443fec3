use serde::Serialize;

use super::{Formatter, FrameOutput, iso8601_timestamp};
use crate::channel::ProcessedRecord;

/// One JSON object per frame (JSON Lines); non-finite values become `null`
pub struct JsonFormatter {
    labels: Vec<String>,
}

impl JsonFormatter {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    ts: String,
    frame: u64,
    channels: Vec<JsonChannel<'a>>,
}

#[derive(Serialize)]
struct JsonChannel<'a> {
    label: &'a str,
    #[serde(flatten)]
    record: &'a ProcessedRecord,
}

impl Formatter for JsonFormatter {
    fn format(&self, output: &FrameOutput<'_>) -> String {
        let frame = JsonFrame {
            ts: iso8601_timestamp(),
            frame: output.frame_index,
            channels: output
                .records
                .iter()
                .zip(&self.labels)
                .map(|(record, label)| JsonChannel {
                    label: label.as_str(),
                    record,
                })
                .collect(),
        };
        serde_json::to_string(&frame).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}

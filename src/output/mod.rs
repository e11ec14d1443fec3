mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::channel::ProcessedRecord;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Processed records of one input frame
pub struct FrameOutput<'a> {
    /// Zero-based position of the frame in the stream
    pub frame_index: u64,
    /// One record per channel, in frame order
    pub records: &'a [ProcessedRecord],
}

pub trait Formatter: Send {
    fn format(&self, output: &FrameOutput<'_>) -> String;

    fn header(&self) -> Option<String> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, labels: Vec<String>) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(labels)),
        OutputFormat::Json => Box::new(JsonFormatter::new(labels)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(labels)),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ProcessedRecord> {
        vec![
            ProcessedRecord {
                filtered_amplitude: 12.3456,
                mean: -0.5,
                rms: 3.0,
            },
            ProcessedRecord {
                filtered_amplitude: f32::NAN,
                mean: f32::NAN,
                rms: f32::NAN,
            },
        ]
    }

    fn labels() -> Vec<String> {
        vec!["TP9".to_string(), "AF7".to_string()]
    }

    #[test]
    fn test_text_rounds_to_two_decimals() {
        let formatter = create_formatter(OutputFormat::Text, labels());
        let records = records();
        let line = formatter.format(&FrameOutput {
            frame_index: 7,
            records: &records,
        });
        assert!(line.contains("TP9: 12.35 (mean -0.50, rms 3.00)"), "{}", line);
        assert!(line.contains("AF7: NaN"), "{}", line);
        assert!(formatter.header().is_none());
    }

    #[test]
    fn test_csv_header_and_row() {
        let formatter = create_formatter(OutputFormat::Csv, labels());
        assert_eq!(
            formatter.header().unwrap(),
            "ts,frame,TP9_amplitude,TP9_mean,TP9_rms,AF7_amplitude,AF7_mean,AF7_rms"
        );

        let records = records();
        let row = formatter.format(&FrameOutput {
            frame_index: 3,
            records: &records,
        });
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[1], "3");
        assert_eq!(fields[2], "12.3456");
        assert_eq!(fields[5], "NaN");
    }

    #[test]
    fn test_json_line_is_valid() {
        let formatter = create_formatter(OutputFormat::Json, labels());
        let records = records();
        let line = formatter.format(&FrameOutput {
            frame_index: 1,
            records: &records,
        });

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["frame"], 1);
        assert_eq!(value["channels"][0]["label"], "TP9");
        assert!(value["channels"][1]["filtered_amplitude"].is_null());
    }
}

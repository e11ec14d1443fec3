use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::SampleSource;
use crate::error::{EegError, Result};

/// Text source with one frame per line
///
/// Fields are separated by commas and/or whitespace. Blank lines and lines
/// starting with `#` are skipped. If the first data line does not parse as
/// numbers it is taken as a column header. `NaN` and `inf` are valid samples.
pub struct DelimitedSource<R> {
    reader: R,
    channel_count: usize,
    line_number: usize,
    seen_data: bool,
    line: String,
}

impl DelimitedSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, channel_count: usize) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), channel_count))
    }
}

impl<R: BufRead> DelimitedSource<R> {
    pub fn new(reader: R, channel_count: usize) -> Self {
        Self {
            reader,
            channel_count,
            line_number: 0,
            seen_data: false,
            line: String::new(),
        }
    }

    fn parse_fields(line: &str) -> std::result::Result<Vec<f32>, String> {
        line.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<f32>()
                    .map_err(|_| format!("invalid sample '{}'", field))
            })
            .collect()
    }
}

impl<R: BufRead + Send> SampleSource for DelimitedSource<R> {
    fn next_frame(&mut self) -> Result<Option<Vec<f32>>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let frame = match Self::parse_fields(trimmed) {
                Ok(frame) => frame,
                Err(_) if !self.seen_data => {
                    log::debug!("Skipping header line {}: {}", self.line_number, trimmed);
                    self.seen_data = true;
                    continue;
                }
                Err(e) => {
                    return Err(EegError::Source(format!("line {}: {}", self.line_number, e)));
                }
            };
            self.seen_data = true;

            if frame.len() != self.channel_count {
                return Err(EegError::Source(format!(
                    "line {}: expected {} samples, got {}",
                    self.line_number,
                    self.channel_count,
                    frame.len()
                )));
            }

            return Ok(Some(frame));
        }
    }

    fn channel_count(&self) -> usize {
        self.channel_count
    }
}

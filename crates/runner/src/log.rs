//! Append-only JSONL round logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::game::RoundRecord;

/// Writes one JSON line per round record.
pub struct RoundLog {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl RoundLog {
    /// Creates a log writing to the given path, truncating any existing file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Creates a log that discards records (for tests and unlogged runs).
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    /// Number of records logged so far.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Appends one record.
    pub fn log(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        self.record_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flushes buffered records to disk.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: usize) -> RoundRecord {
        RoundRecord {
            round,
            player: 0,
            action: Some("toggle(0,1)".to_string()),
            improvement: Some(0.25),
            applied: true,
            score: 0.5,
        }
    }

    #[test]
    fn test_null_log_counts_without_writing() {
        let mut log = RoundLog::null();
        log.log(&record(0)).unwrap();
        log.log(&record(1)).unwrap();
        assert_eq!(log.record_count(), 2);
    }

    #[test]
    fn test_log_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");

        let mut log = RoundLog::create(&path).unwrap();
        log.log(&record(0)).unwrap();
        log.log(&record(1)).unwrap();
        log.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["round"], 0);
        assert_eq!(parsed["action"], "toggle(0,1)");
    }
}

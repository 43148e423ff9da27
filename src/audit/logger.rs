//! Append-only submission log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{RegisterError, RegisterResult};

use super::entry::SubmissionEntry;

/// Writes submission entries to a JSONL file
pub struct SubmissionLog {
    log_path: PathBuf,
}

impl SubmissionLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry
    pub fn log(&self, entry: &SubmissionEntry) -> RegisterResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RegisterError::Io(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| RegisterError::Io(format!("Failed to open submission log: {}", e)))?;

        let json = serde_json::to_string(entry).map_err(|e| {
            RegisterError::Json(format!("Failed to serialize submission entry: {}", e))
        })?;

        writeln!(file, "{}", json)
            .map_err(|e| RegisterError::Io(format!("Failed to write submission entry: {}", e)))?;

        file.flush()
            .map_err(|e| RegisterError::Io(format!("Failed to flush submission log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> RegisterResult<Vec<SubmissionEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| RegisterError::Io(format!("Failed to open submission log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                RegisterError::Io(format!(
                    "Failed to read submission log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: SubmissionEntry = serde_json::from_str(&line).map_err(|e| {
                RegisterError::Json(format!(
                    "Failed to parse submission entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> RegisterResult<Vec<SubmissionEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

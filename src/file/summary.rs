// src/file/summary.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{write_formatted, FileHandler, Format};
use crate::config::StateRecord;

/// Reads and writes a single record, as shown on screen.
#[derive(Debug)]
pub struct SummaryFileHandler;

impl SummaryFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<StateRecord> for SummaryFileHandler {
    fn load(&self, path: &Path) -> Result<StateRecord> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary {}", path.display()))?;
        match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content).context("Failed to parse summary file"),
            Format::Ron => ron::from_str(&content).context("Failed to parse summary file"),
        }
    }

    fn save(&self, data: &StateRecord, path: &Path) -> Result<()> {
        write_formatted(data, path)
    }
}

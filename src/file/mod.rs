// src/file/mod.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Dataset, RegionTablePolicy, StateRecord};

pub mod dataset;
pub mod loader;
pub mod map;
pub mod summary;

pub use loader::MapLoader;
pub use map::MapSource;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Unsupported file type '{0}', expected .json or .ron")]
    UnsupportedFormat(String),

    #[error("{state}: {field} must be a finite, non-negative number (got {value})")]
    InvalidValue {
        state: String,
        field: String,
        value: f64,
    },

    #[error("Dataset does not match the region table: {0}")]
    RegionTable(String),
}

/// On-disk formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let ext = path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "ron" => Ok(Format::Ron),
            _ => Err(DatasetError::UnsupportedFormat(ext)),
        }
    }
}

pub(crate) fn write_formatted<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let content = match Format::from_path(path)? {
        Format::Json => serde_json::to_string_pretty(data)?,
        Format::Ron => ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(4)
                .separate_tuple_members(true)
        )?,
    };
    fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Debug)]
pub struct FileManager {
    dataset_handler: dataset::DatasetFileHandler,
    summary_handler: summary::SummaryFileHandler,
}

impl FileManager {
    pub fn new(policy: RegionTablePolicy) -> Self {
        Self {
            dataset_handler: dataset::DatasetFileHandler::new(policy),
            summary_handler: summary::SummaryFileHandler::new(),
        }
    }

    /// Loads `path`, or the bundled dataset when no path is given.
    pub fn load_dataset(&self, path: Option<&Path>) -> Result<Dataset> {
        let dataset = match path {
            Some(path) => self.dataset_handler.load(path)?,
            None => self.dataset_handler.bundled()
                .context("Bundled dataset is invalid")?,
        };
        info!(
            "Loaded dataset with {} states from {}",
            dataset.len(),
            path.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled data".to_string())
        );
        if dataset.is_empty() {
            warn!("Dataset has no states; every map region will show as no data");
        }
        Ok(dataset)
    }

    pub fn export_summary(&self, record: &StateRecord, path: &Path) -> Result<()> {
        self.summary_handler.save(record, path)?;
        info!("Exported {} summary to {}", record.full_name, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("data.JSON")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("dir/data.ron")).unwrap(), Format::Ron);
        assert!(matches!(
            Format::from_path(Path::new("data.csv")),
            Err(DatasetError::UnsupportedFormat(ext)) if ext == "csv"
        ));
        assert!(Format::from_path(Path::new("data")).is_err());
    }

    #[test]
    fn test_manager_falls_back_to_bundled() {
        let manager = FileManager::new(RegionTablePolicy::Strict);
        let dataset = manager.load_dataset(None).unwrap();
        assert_eq!(dataset.len(), 15);
        assert!(dataset.get("Maharashtra").is_some());
    }

    #[test]
    fn test_manager_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(RegionTablePolicy::Lenient);
        assert!(manager.load_dataset(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_manager_accepts_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        for policy in [RegionTablePolicy::Lenient, RegionTablePolicy::Strict] {
            let dataset = FileManager::new(policy).load_dataset(Some(&path)).unwrap();
            assert!(dataset.is_empty());
        }
    }
}

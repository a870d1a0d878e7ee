// src/file/dataset.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::{write_formatted, DatasetError, FileHandler, Format};
use crate::config::{Dataset, RegionTablePolicy, REGION_TABLE};

pub const BUNDLED_DATASET: &str = include_str!("../../assets/indian-states-data.json");

#[derive(Debug)]
pub struct DatasetFileHandler {
    policy: RegionTablePolicy,
}

impl DatasetFileHandler {
    pub fn new(policy: RegionTablePolicy) -> Self {
        Self { policy }
    }

    pub fn bundled(&self) -> Result<Dataset, DatasetError> {
        self.parse(BUNDLED_DATASET, Format::Json)
    }

    /// Deserializes, validates and reconciles a dataset document.
    pub fn parse(&self, content: &str, format: Format) -> Result<Dataset, DatasetError> {
        let mut dataset: Dataset = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Ron => ron::from_str(content)?,
        };
        normalize(&mut dataset)?;
        reconcile(&dataset, self.policy)?;
        Ok(dataset)
    }
}

impl FileHandler<Dataset> for DatasetFileHandler {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        self.parse(&content, format)
            .with_context(|| format!("Failed to load dataset {}", path.display()))
    }

    fn save(&self, data: &Dataset, path: &Path) -> Result<()> {
        write_formatted(data, path)
    }
}

fn check_amount(state: &str, field: String, value: f64) -> Result<(), DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DatasetError::InvalidValue {
            state: state.to_string(),
            field,
            value,
        })
    }
}

fn normalize(dataset: &mut Dataset) -> Result<(), DatasetError> {
    for (key, record) in dataset.records_mut() {
        if record.full_name.trim().is_empty() {
            debug!("{} has no fullName, using its key", key);
            record.full_name = key.clone();
        } else if record.full_name != *key {
            warn!("Dataset key '{}' has fullName '{}'", key, record.full_name);
        }

        for (sector, amount) in &record.funding_by_sector {
            check_amount(key, format!("funding_by_sector.{}", sector), *amount)?;
        }
        if let Some(employment) = &record.employment_data {
            check_amount(key, "employment_data.avg_salary".to_string(), employment.avg_salary)?;
        }
    }
    Ok(())
}

/// Compares dataset keys with the names the map identifiers translate to.
/// Regions without a dataset entry are expected and never reported.
fn reconcile(dataset: &Dataset, policy: RegionTablePolicy) -> Result<(), DatasetError> {
    let problems: Vec<String> = dataset.keys()
        .filter_map(|key| {
            match REGION_TABLE.iter().find(|(_, name)| name.eq_ignore_ascii_case(key.trim())) {
                None => Some(format!("'{}' is not reachable from any map region", key)),
                Some((id, name)) if *name != key => {
                    Some(format!("'{}' matches {} ('{}') only ignoring case", key, id, name))
                }
                Some(_) => None,
            }
        })
        .collect();

    if problems.is_empty() {
        return Ok(());
    }

    match policy {
        RegionTablePolicy::Lenient => {
            for problem in &problems {
                warn!("Region table mismatch: {}", problem);
            }
            Ok(())
        }
        RegionTablePolicy::Strict => Err(DatasetError::RegionTable(problems.join("; "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> DatasetFileHandler {
        DatasetFileHandler::new(RegionTablePolicy::Lenient)
    }

    #[test]
    fn test_bundled_dataset_is_valid_and_ordered() {
        let dataset = DatasetFileHandler::new(RegionTablePolicy::Strict).bundled().unwrap();
        assert_eq!(dataset.keys().next(), Some("Maharashtra"));

        let years: Vec<&str> = dataset.get("Goa").unwrap()
            .startups_growth_yearly.keys()
            .map(String::as_str)
            .collect();
        assert_eq!(years, ["2019", "2020", "2021", "2022", "2023", "2024"]);
    }

    #[test]
    fn test_empty_full_name_takes_key() {
        let dataset = lenient().parse(r#"{ "Goa": { "fullName": "" } }"#, Format::Json).unwrap();
        assert_eq!(dataset.get("Goa").unwrap().full_name, "Goa");
    }

    #[test]
    fn test_negative_funding_is_rejected() {
        let content = r#"{ "Goa": { "fullName": "Goa", "funding_by_sector": { "Fintech": -4.0 } } }"#;
        match lenient().parse(content, Format::Json) {
            Err(DatasetError::InvalidValue { state, field, .. }) => {
                assert_eq!(state, "Goa");
                assert_eq!(field, "funding_by_sector.Fintech");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let content = r#"{ "Goa": { "employment_data": { "avg_salary": -1.0 } } }"#;
        assert!(matches!(
            lenient().parse(content, Format::Json),
            Err(DatasetError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_region_policy() {
        let content = r#"{ "goa": { "fullName": "goa" }, "Atlantis": { "fullName": "Atlantis" } }"#;
        assert_eq!(lenient().parse(content, Format::Json).unwrap().len(), 2);

        let strict = DatasetFileHandler::new(RegionTablePolicy::Strict);
        match strict.parse(content, Format::Json) {
            Err(DatasetError::RegionTable(message)) => {
                assert!(message.contains("Atlantis"));
                assert!(message.contains("INGA"));
            }
            other => panic!("expected RegionTable, got {:?}", other),
        }
    }

    #[test]
    fn test_ron_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let handler = lenient();
        let dataset = handler.bundled().unwrap();

        let path = dir.path().join("states.ron");
        handler.save(&dataset, &path).unwrap();
        let reloaded = handler.load(&path).unwrap();
        assert_eq!(reloaded, dataset);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"Goa\": ").unwrap();

        let err = lenient().load(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<DatasetError>(), Some(DatasetError::Json(_))));
    }
}

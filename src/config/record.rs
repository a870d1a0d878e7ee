// src/config/record.rs
use indexmap::IndexMap;
use serde::{Serialize, Deserialize};

/// Ordered label -> value mapping. Order is the order the labels appeared in
/// the source document (chronological for years).
pub type Breakdown<V> = IndexMap<String, V>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub total_startups: u64,
    #[serde(default)]
    pub unicorns_total: u64,
    #[serde(default)]
    pub women_led_total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentData {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub avg_salary: f64,
    #[serde(default)]
    pub top_skills: Vec<String>,
}

/// Startup metrics for one state or union territory. The national summary
/// uses the same shape with `full_name == "India"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub startups_by_sector: Breakdown<u64>,
    #[serde(default)]
    pub funding_by_sector: Breakdown<f64>,
    #[serde(default)]
    pub startups_growth_yearly: Breakdown<u64>,
    #[serde(default)]
    pub top_cities_by_startups: Breakdown<u64>,
    #[serde(default)]
    pub startup_stage_distribution: Breakdown<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_data: Option<EmploymentData>,
}

impl StateRecord {
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }
}

/// The full state -> record mapping. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: IndexMap<String, StateRecord>,
}

impl Dataset {
    pub fn new(records: IndexMap<String, StateRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, key: &str) -> Option<&StateRecord> {
        self.records.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &StateRecord> {
        self.records.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = (&String, &mut StateRecord)> {
        self.records.iter_mut()
    }
}

impl FromIterator<StateRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = StateRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|r| (r.full_name.clone(), r)).collect())
    }
}

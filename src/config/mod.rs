// src/config/mod.rs
pub mod record;
pub mod region;
pub mod settings;

// Re-export commonly used types
pub use record::{Breakdown, Dataset, EmploymentData, StateRecord, Totals};
pub use region::{region_id, region_name, RegionId, RegionIdentifier, REGION_TABLE};
pub use settings::{RegionTablePolicy, Settings, ThemeMode};

// src/config/settings.rs
use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "STARTUP_ATLAS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// How to treat drift between the region table and the dataset keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTablePolicy {
    /// Log the mismatch and render the region without data.
    #[default]
    Lenient,
    /// Reject the dataset.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// JSON or RON dataset. `None` uses the bundled dataset.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
    /// File path or http(s) URL of the SVG map. `None` uses the bundled map.
    #[serde(default)]
    pub map_source: Option<String>,
    #[serde(default)]
    pub region_policy: RegionTablePolicy,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_map_height")]
    pub map_height: f32,
}

fn default_log_filter() -> String {
    "startup_atlas=info".to_string()
}

fn default_map_height() -> f32 {
    450.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            map_source: None,
            region_policy: RegionTablePolicy::default(),
            theme: ThemeMode::default(),
            log_filter: default_log_filter(),
            map_height: default_map_height(),
        }
    }
}

impl Settings {
    /// `$XDG_CONFIG_HOME/startup-atlas/settings.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("startup-atlas").join("settings.toml"))
    }

    /// Layers the optional settings file and `STARTUP_ATLAS_*` environment
    /// variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize::<Settings>()
            .context("Invalid settings")?;

        Ok(settings)
    }
}

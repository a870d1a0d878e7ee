// src/file/map.rs
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::map::{parse_svg, MapError, RegionMap};

pub const BUNDLED_MAP: &str = include_str!("../../assets/india-states.svg");

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the SVG map comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl MapSource {
    /// Interprets the `map_source` setting: empty means bundled, an
    /// `http(s)://` prefix means a URL, anything else is a file path.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => MapSource::Bundled,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                MapSource::Url(url.to_string())
            }
            Some(path) => MapSource::File(PathBuf::from(path)),
        }
    }

    /// Blocking; call from the loader thread.
    pub fn fetch(&self) -> Result<String, MapError> {
        match self {
            MapSource::Bundled => Ok(BUNDLED_MAP.to_string()),
            MapSource::File(path) => Ok(fs::read_to_string(path)?),
            MapSource::Url(url) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()?;
                let text = client.get(url).send()?.error_for_status()?.text()?;
                Ok(text)
            }
        }
    }

    pub fn load(&self) -> Result<RegionMap, MapError> {
        let text = self.fetch()?;
        parse_svg(&text)
    }
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSource::Bundled => write!(f, "bundled map"),
            MapSource::File(path) => write!(f, "{}", path.display()),
            MapSource::Url(url) => write!(f, "{}", url),
        }
    }
}

//! Analysis configuration
//!
//! Layers, later overriding earlier: built-in defaults, an optional JSON
//! file, then environment variables:
//!   COMPLEX_DATA_PATH, EVALUATION_YEAR, HORIZONS (comma-separated years)

use crate::error::ConfigError;
use crate::projection::DEFAULT_HORIZONS;
use crate::series::loader::DEFAULT_TABLE_PATH;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_TABLE_PATH)
}

fn default_horizons() -> Vec<u32> {
    DEFAULT_HORIZONS.to_vec()
}

/// Settings shared by every report in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Price table location
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Anchor year for growth estimation (default: latest year in the table)
    #[serde(default)]
    pub evaluation_year: Option<i32>,

    /// Projection horizons in years
    #[serde(default = "default_horizons")]
    pub horizons: Vec<u32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            evaluation_year: None,
            horizons: default_horizons(),
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Read a JSON file; fields it omits keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("COMPLEX_DATA_PATH") {
            self.data_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("EVALUATION_YEAR") {
            match raw.trim().parse() {
                Ok(year) => self.evaluation_year = Some(year),
                Err(_) => warn!("Ignoring EVALUATION_YEAR={:?}: not a year", raw),
            }
        }

        if let Some(raw) = lookup("HORIZONS") {
            match parse_horizons(&raw) {
                Some(horizons) => self.horizons = horizons,
                None => warn!("Ignoring HORIZONS={:?}: expected comma-separated years", raw),
            }
        }

        self
    }
}

/// Parse "1,2,3,5,10". Empty lists are rejected.
pub fn parse_horizons(raw: &str) -> Option<Vec<u32>> {
    let horizons: Option<Vec<u32>> = raw
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect();
    horizons.filter(|h| !h.is_empty())
}

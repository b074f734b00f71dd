//! Configuration file
//!
//! ```json
//! {
//!   "data_dir": "data/processed/tpch_10gb",
//!   "preset": "local",
//!   "relative_boost_threshold": 1.2,
//!   "max_iter": null,
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `data_dir` is required. `relative_boost_threshold` and `max_iter`
//! override the preset when present.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::search::{preset, SearchSettings};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Processed benchmark snapshot directory (required)
    pub data_dir: String,

    /// Search preset name (default "local")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Overrides the preset threshold
    #[serde(default)]
    pub relative_boost_threshold: Option<f64>,

    /// Overrides the preset iteration budget
    #[serde(default)]
    pub max_iter: Option<u64>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_preset() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        self.severity()?;
        self.search_settings()?;
        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }

    /// Preset with overrides applied
    pub fn search_settings(&self) -> CliResult<SearchSettings> {
        let base = preset(&self.preset)?;
        let mut builder = base.to_builder();
        if let Some(threshold) = self.relative_boost_threshold {
            builder = builder.relative_boost_threshold(threshold);
        }
        if let Some(max_iter) = self.max_iter {
            builder = builder.max_iter(max_iter);
        }
        Ok(builder.build()?)
    }
}

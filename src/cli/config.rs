//! TOML configuration file support.
//!
//! Output settings can be kept in a file instead of passed as flags:
//!
//! ```toml
//! # pepxml2hits.toml
//! [output]
//! legacy = true
//! progress_interval = 5000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for pepxml2hits.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the hit list output.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Write the legacy column set.
    pub legacy: Option<bool>,

    /// Log progress every this many rows.
    pub progress_interval: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.dataranges.toml` files. The station-class label table lives here:
//! labels are static external configuration, not computed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Class label settings.
    #[serde(default)]
    pub labels: LabelConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Loader directory layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Subdirectory holding system record files.
    #[serde(default = "default_systems_dir")]
    pub systems_dir: String,

    /// Subdirectory holding asset record files.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Record file extension (without dot).
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            systems_dir: default_systems_dir(),
            assets_dir: default_assets_dir(),
            extension: default_extension(),
        }
    }
}

fn default_systems_dir() -> String {
    "ssys".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

/// Station-class label lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Label for station-class codes missing from the table.
    #[serde(default = "default_unknown_label")]
    pub unknown: String,

    /// Labels for the numeric station-class codes.
    #[serde(default = "default_station_classes")]
    pub station_classes: BTreeMap<String, String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            unknown: default_unknown_label(),
            station_classes: default_station_classes(),
        }
    }
}

impl LabelConfig {
    /// Resolve the label for a station-class code.
    pub fn station_label(&self, code: &str) -> &str {
        self.station_classes
            .get(code)
            .map_or(self.unknown.as_str(), String::as_str)
    }
}

fn default_station_classes() -> BTreeMap<String, String> {
    [
        ("0", "civilian"),
        ("1", "military"),
        ("2", "interfactional"),
        ("3", "robotic"),
    ]
    .into_iter()
    .map(|(code, label)| (code.to_string(), label.to_string()))
    .collect()
}

fn default_unknown_label() -> String {
    "unknown".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".dataranges.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

//! Main application configuration
//!
//! This module defines the configuration structures for the pairing tool,
//! including TOML file loading, environment variable overrides and
//! validation.

use crate::config::roster::RosterColumns;
use crate::error::CoffeePairsError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub files: FileSettings,
    pub roster: RosterColumns,
    pub matching: MatchingSettings,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name recorded on the span wrapping every log line
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input and output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Member roster exported as CSV
    pub roster_path: Option<PathBuf>,
    /// Directory holding versioned history files
    pub history_dir: PathBuf,
    /// History file name prefix, followed by the version number
    pub history_prefix: String,
    /// History file name suffix
    pub history_suffix: String,
    /// Human-readable report, overwritten on every run
    pub report_path: PathBuf,
}

/// Matching settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Fixed shuffle seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "coffee-pairs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            roster_path: None,
            history_dir: PathBuf::from("."),
            history_prefix: "past_matches_".to_string(),
            history_suffix: ".csv".to_string(),
            report_path: PathBuf::from("current_matches.txt"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("COFFEE_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("COFFEE_LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // File settings
        if let Ok(roster) = env::var("COFFEE_ROSTER_PATH") {
            self.files.roster_path = Some(PathBuf::from(roster));
        }
        if let Ok(dir) = env::var("COFFEE_HISTORY_DIR") {
            self.files.history_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = env::var("COFFEE_HISTORY_PREFIX") {
            self.files.history_prefix = prefix;
        }
        if let Ok(suffix) = env::var("COFFEE_HISTORY_SUFFIX") {
            self.files.history_suffix = suffix;
        }
        if let Ok(report) = env::var("COFFEE_REPORT_PATH") {
            self.files.report_path = PathBuf::from(report);
        }

        if let Ok(label) = env::var("COFFEE_EXECUTIVE_LABEL") {
            self.roster.executive_label = label;
        }

        // Matching settings
        if let Ok(seed) = env::var("COFFEE_SEED") {
            self.matching.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid COFFEE_SEED value: {}", seed))?,
            );
        }

        Ok(())
    }

    /// Roster path, which must be configured before a run
    pub fn roster_path(&self) -> Result<&Path> {
        self.files.roster_path.as_deref().ok_or_else(|| {
            CoffeePairsError::ConfigurationError {
                message: "No member file given. Pass a roster path or set COFFEE_ROSTER_PATH."
                    .to_string(),
            }
            .into()
        })
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.service.name.trim().is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate history naming
    if config.files.history_prefix.is_empty() {
        return Err(anyhow!("History file prefix cannot be empty"));
    }
    if config.files.history_prefix.chars().any(|c| c.is_ascii_digit()) {
        return Err(anyhow!(
            "History file prefix cannot contain digits: {}",
            config.files.history_prefix
        ));
    }
    if config.files.history_suffix.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(anyhow!(
            "History file suffix cannot start with a digit: {}",
            config.files.history_suffix
        ));
    }
    if config.files.report_path.as_os_str().is_empty() {
        return Err(anyhow!("Report path cannot be empty"));
    }

    // Validate roster columns
    let columns = config.roster.as_array();
    if columns.iter().any(|c| c.trim().is_empty()) {
        return Err(anyhow!("Roster column names cannot be empty"));
    }
    for (i, column) in columns.iter().enumerate() {
        if columns[i + 1..].contains(column) {
            return Err(anyhow!("Roster column '{}' is configured twice", column));
        }
    }
    if config.roster.executive_label.trim().is_empty() {
        return Err(anyhow!("Executive tier label cannot be empty"));
    }

    Ok(())
}

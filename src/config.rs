/// Service configuration loaded from a TOML file.
///
/// Every field has a default, so a missing configuration file yields a
/// fully working setup pointed at the canonical dataset location. The
/// defaults mirror the production dashboard: 6-month / 1-year / 2-year
/// moving averages over the 2019–2025 yearly overlay range.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Configuration sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the canonical JSON dataset.
    pub path: String,
    /// Optional remote dataset URL; takes precedence over `path` when set.
    pub url: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            path: "data/rio-negro-data.json".to_string(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing moving-average windows, in days.
    pub moving_average_windows: Vec<usize>,
    /// First year of the yearly overlay chart.
    pub year_start: i32,
    /// Last year of the yearly overlay chart.
    pub year_end: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            moving_average_windows: vec![182, 365, 730],
            year_start: 2019,
            year_end: 2025,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity: "debug" | "info" | "warn" | "error".
    pub min_level: String,
    /// Optional log file path.
    pub file: Option<String>,
    /// Whether console lines carry full timestamps.
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            min_level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Errors reading or parsing the configuration file.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if the file exists; defaults otherwise.
    /// A file that exists but fails to parse is still an error — silently
    /// ignoring a broken config hides misconfiguration.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Analysis configuration loaded from TOML.
//!
//! ```toml
//! [stats]
//! window = "30d"
//! as_of = "2024-06-30T16:00:00Z"   # optional, defaults to now
//!
//! [tax]
//! year = 2024
//!
//! [export]
//! output_dir = "reports"
//! format = "both"                  # json | csv | both
//! ```
//!
//! Every section and key is optional. Command-line flags override file values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradelog_core::dates::year_range;
use tradelog_core::{parse_timestamp, TimeWindow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid as_of timestamp '{0}'")]
    InvalidAsOf(String),

    #[error("tax year {0} is outside the supported range")]
    InvalidYear(i32),

    #[error("unknown export format '{0}' (expected json, csv or both)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub stats: StatsSection,
    pub tax: TaxSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsSection {
    pub window: TimeWindow,
    /// Anchor for trailing windows. `None` means "now" at the call site.
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxSection {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            format: ExportFormat::Both,
        }
    }
}

/// Which file formats the exporters write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    #[default]
    Both,
}

impl ExportFormat {
    pub fn json(self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }

    pub fn csv(self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Both => "both",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "both" => Ok(ExportFormat::Both),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.as_of()?;
        if let Some(year) = self.tax.year {
            year_range(year).map_err(|_| ConfigError::InvalidYear(year))?;
        }
        Ok(())
    }

    /// Parsed `stats.as_of`, if set.
    pub fn as_of(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        self.stats
            .as_of
            .as_deref()
            .map(|raw| parse_timestamp(raw).map_err(|_| ConfigError::InvalidAsOf(raw.to_string())))
            .transpose()
    }
}

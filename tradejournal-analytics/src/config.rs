//! User settings: default journal, account figures, report output.
//!
//! Settings live in a TOML file, by default
//! `<config dir>/tradejournal/settings.toml`. Every section and key is
//! optional; missing values fall back to [`Settings::default`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.0;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub journal: JournalSettings,
    pub account: AccountSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Journal analysed when none is named on the command line.
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Balance the equity export starts from.
    pub starting_balance: f64,
    pub currency: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// How `analyze` prints a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

#[derive(Debug, Error)]
#[error("unknown output format {0:?} (expected table, json or markdown)")]
pub struct ParseFormatError(pub String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        })
    }
}

impl Settings {
    /// Load and validate settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let balance = self.account.starting_balance;
        if !balance.is_finite() || balance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "account.starting_balance",
                reason: format!("must be a non-negative number, got {balance}"),
            });
        }
        if self.account.currency.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "account.currency",
                reason: "must not be empty".into(),
            });
        }
        if let Some(journal) = &self.journal.selected {
            if journal.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "journal.selected",
                    reason: "must not be blank; remove the key to analyse every journal".into(),
                });
            }
        }
        Ok(())
    }

    /// `<config dir>/tradejournal/settings.toml`, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tradejournal").join("settings.toml"))
    }

    /// Load from `path` if given, otherwise from [`Settings::default_path`].
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => {
                tracing::debug!(path = %default.display(), "loading settings");
                Self::from_file(&default)
            }
            _ => Ok(Self::default()),
        }
    }
}

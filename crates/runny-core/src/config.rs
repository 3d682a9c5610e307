// crates/runny-core/src/config.rs - Configuration and log level
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--vault, --launcher, --log-level)
// 2. Environment variables (OBSIDIAN_VAULT, OBSIDIAN_RUNNY_LOG, OBSIDIAN_RUNNY_CONFIG)
// 3. Config file (~/.config/obsidian-runny/config.yaml)
// 4. Built-in defaults
//
// The CLI layer resolves 1 and 2; this module owns the file format and the
// defaults. A missing default config file is fine, a missing file the user
// named explicitly is an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::launcher::{LauncherKind, XdgOpen};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "obsidian-runny";

/// File name inside `APP_DIR`
pub const CONFIG_FILE: &str = "config.yaml";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid YAML in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("Invalid log level: {given:?}. Expected one of: {known}")]
    InvalidLogLevel { given: String, known: String },

    #[error("I/O error reading config: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Verbosity, named the way most logging setups name levels
///
/// Parsing is case-insensitive and accepts the common aliases
/// (`fatal`, `warn`, `notset`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Critical,
    Error,
    #[default]
    Warning,
    Info,
    Debug,
    Trace,
}

/// Every accepted spelling, upper-cased
const LEVEL_NAMES: &[(&str, LogLevel)] = &[
    ("CRITICAL", LogLevel::Critical),
    ("FATAL", LogLevel::Critical),
    ("ERROR", LogLevel::Error),
    ("WARN", LogLevel::Warning),
    ("WARNING", LogLevel::Warning),
    ("INFO", LogLevel::Info),
    ("DEBUG", LogLevel::Debug),
    ("TRACE", LogLevel::Trace),
    ("NOTSET", LogLevel::Trace),
];

impl LogLevel {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Directive string for an env-filter style subscriber
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Critical | Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        LEVEL_NAMES
            .iter()
            .find(|(name, _)| *name == upper)
            .map(|(_, level)| *level)
            .ok_or_else(|| ConfigError::InvalidLogLevel {
                given: s.to_string(),
                known: LEVEL_NAMES
                    .iter()
                    .map(|(name, _)| format!("{name:?}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> ConfigResult<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// User configuration
///
/// Every field has a default so partial files work:
///
/// ```yaml
/// default_vault: Personal
/// launcher: xdg
/// xdg:
///   log: true
/// log_level: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnyConfig {
    /// Vault name or ID used when none is given on the command line
    pub default_vault: Option<String>,

    /// Which launcher opens URIs
    pub launcher: LauncherKind,

    /// Options for the xdg-open launcher
    pub xdg: XdgOpen,

    /// Default log level
    pub log_level: LogLevel,
}

impl RunnyConfig {
    /// `<config dir>/obsidian-runny/config.yaml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or the default location, or built-in defaults
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read and validate a YAML config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::IoError(e),
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { error, .. } => ConfigError::ParseError {
                file: path.display().to_string(),
                error,
            },
            other => other,
        })?;

        Ok(config)
    }

    /// Parse and validate YAML text; an empty document yields the defaults
    pub fn parse(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            file: "<string>".to_string(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(vault) = &self.default_vault {
            if vault.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "default_vault must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Render as YAML, e.g. for writing a starter config
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError {
            file: "<string>".to_string(),
            error: e.to_string(),
        })
    }
}

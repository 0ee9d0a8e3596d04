//! Application configuration.
//!
//! Loaded once at startup and handed to the UI or CLI. Stored as TOML; every
//! field has a default, so an empty file or no file at all is a valid
//! configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::date_range::default_start_date;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Width of the main content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageLayout {
    #[default]
    Wide,
    Centered,
}

/// Whether the sidebar is shown when the dashboard opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SidebarState {
    #[default]
    Expanded,
    Collapsed,
}

/// Process-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_title: String,
    pub page_icon: String,
    pub layout: PageLayout,
    pub initial_sidebar_state: SidebarState,
    /// Initial start date of the date range.
    pub default_start: NaiveDate,
    /// Directory exported CSV files are written to.
    pub download_dir: PathBuf,
    /// HTTP request timeout for the market data provider, in seconds.
    pub request_timeout_secs: u64,
    /// Log file for the terminal UI. `None` uses the user cache directory.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_title: "StockFlow".into(),
            page_icon: "💰".into(),
            layout: PageLayout::Wide,
            initial_sidebar_state: SidebarState::Expanded,
            default_start: default_start_date(),
            download_dir: PathBuf::from("."),
            request_timeout_secs: 30,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from an explicit path, else the default location, else defaults.
    ///
    /// An explicit path must exist; a missing default file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/stockflow/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stockflow").join("config.toml"))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolved log file location for the terminal UI.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("stockflow")
                .join("stockflow.log")
        })
    }
}

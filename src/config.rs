//! Configuration management for sheetquery.
//!
//! Handles loading configuration from a TOML file. Every field has a
//! built-in default, and command-line flags override whatever the file sets.

use crate::error::{Result, SheetQueryError};
use crate::workbook::{TextFormats, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for sheetquery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Query settings.
    #[serde(default)]
    pub query: QueryConfig,

    /// Sheet ingestion settings.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Query settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// LIMIT applied by the per-sheet default query.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    50
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// How typed cells are turned into text when a sheet is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// chrono format for dates at midnight.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// chrono format for dates with a time part.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            datetime_format: default_datetime_format(),
        }
    }
}

impl IngestConfig {
    /// Returns the text formats used by the loader.
    pub fn text_formats(&self) -> TextFormats {
        TextFormats {
            date_format: self.date_format.clone(),
            datetime_format: self.datetime_format.clone(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetquery")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SheetQueryError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses and validates configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SheetQueryError::config(format!("in {}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| SheetQueryError::config(format!("in {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.query.page_size == 0 {
            return Err("query.page_size must be at least 1".to_string());
        }
        if self.ingest.date_format.trim().is_empty() || self.ingest.datetime_format.trim().is_empty() {
            return Err("ingest date formats must not be empty".to_string());
        }
        Ok(())
    }
}

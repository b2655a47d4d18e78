//! Command-line argument parsing for sheetquery.

use crate::config::Config;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How one-shot results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Text,
    /// `{"columns": [...], "rows": [[...]]}`.
    Json,
}

/// What `--export` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    /// The selected (or first) sheet as `<sheet>.csv`.
    Sheet,
    /// The executed query as `query-results.csv`.
    Query,
    /// Every sheet in one zip archive.
    All,
}

/// Query spreadsheet files with SQL.
#[derive(Parser, Debug)]
#[command(name = "sheetquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet to load (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// SQL to execute against the loaded sheets
    #[arg(short = 'e', long = "execute", value_name = "SQL")]
    pub sql: Option<String>,

    /// Sheet whose default query runs, and which `--export sheet` writes
    #[arg(short = 's', long, value_name = "SHEET")]
    pub sheet: Option<String>,

    /// Write an export instead of printing results
    #[arg(long, value_enum, value_name = "TARGET")]
    pub export: Option<ExportTarget>,

    /// Directory exports are written to (overrides config)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format for printed results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Rows shown by a sheet's default query (overrides config)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "SHEETQUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start the interactive command shell
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns true when the command shell should start.
    pub fn is_interactive(&self) -> bool {
        self.interactive || self.file.is_none()
    }

    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(page_size) = self.page_size {
            config.query.page_size = page_size as usize;
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
    }
}

//! The error enum shared by every layer of sheetquery.
//!
//! Display strings are user-facing: the shell prints them verbatim as the
//! status message.

use thiserror::Error;

/// Main error type for sheetquery operations.
#[derive(Error, Debug)]
pub enum SheetQueryError {
    /// The spreadsheet parser rejected the file or found no sheets.
    #[error("Error loading file: {0}")]
    Parse(String),

    /// One sheet could not be materialized as a table.
    #[error("Failed to load sheet '{sheet}': {message}")]
    SheetLoad { sheet: String, message: String },

    /// No SQL text was submitted.
    #[error("Please enter a SQL query")]
    EmptyQuery,

    /// The engine rejected a non-empty statement.
    #[error("SQL Error: {0}")]
    QueryFailed(String),

    /// A query export was requested before any query succeeded.
    #[error("No query executed yet")]
    NoQueryExecuted,

    /// Serialization or archive construction failed.
    #[error("Export error: {0}")]
    Export(String),

    /// An operation needs a loaded workbook.
    #[error("No file loaded")]
    NoWorkbook,

    /// The named sheet is not part of the loaded workbook.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The config file could not be read or holds invalid values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors outside of parsing and exporting.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A state the program should never reach.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SheetQueryError {
    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a sheet load error for the given sheet.
    pub fn sheet_load(sheet: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SheetLoad {
            sheet: sheet.into(),
            message: msg.into(),
        }
    }

    /// Creates a query failure carrying the engine's message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }

    /// Creates an export error with the given message.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short heading used when the binary reports a fatal error.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Parse Error",
            Self::SheetLoad { .. } => "Sheet Load Error",
            Self::EmptyQuery => "Empty Query",
            Self::QueryFailed(_) => "Query Error",
            Self::NoQueryExecuted => "No Query Executed",
            Self::Export(_) => "Export Error",
            Self::NoWorkbook | Self::SheetNotFound(_) => "Workbook Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "IO Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using SheetQueryError.
pub type Result<T> = std::result::Result<T, SheetQueryError>;

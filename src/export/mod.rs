//! Result export: single sheet, last query, or every sheet as a zip.
//!
//! Every export re-runs its query so the file reflects the engine's current
//! contents. Exports produce an [`ExportFile`]; [`ExportFile::save_to`]
//! writes it into a directory under a path-safe name.

mod archive;
mod csv;
mod display;

pub use archive::build_zip;
pub use self::csv::{escape_csv, to_csv};
pub use display::{to_display_rows, DisplayTable};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::db::{QueryEngine, QueryResult, Schema};
use crate::error::{Result, SheetQueryError};
use crate::query::QueryExecutor;

/// File name used for exporting the last executed query.
pub const QUERY_EXPORT_FILE_NAME: &str = "query-results.csv";

/// File name of the all-sheets archive.
pub const ALL_SHEETS_ARCHIVE_NAME: &str = "excel-export-all-sheets.zip";

/// An exported file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested download name, such as `Employees.csv`.
    pub file_name: String,

    /// File contents: UTF-8 CSV text or a zip archive.
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Wraps already-encoded contents under a file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Writes the file into `dir` and returns the written path.
    ///
    /// The directory is created if needed.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(safe_file_name(&self.file_name));
        std::fs::write(&path, &self.bytes)?;
        info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Makes a file name safe to join onto a directory.
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => "export".to_string(),
        _ => cleaned,
    }
}

/// Exports one sheet's table as `<sheet_name>.csv`.
pub async fn export_sheet(
    engine: &dyn QueryEngine,
    schema: &Schema,
    sheet_name: &str,
) -> Result<ExportFile> {
    let table = schema
        .table_for_sheet(sheet_name)
        .ok_or_else(|| SheetQueryError::SheetNotFound(sheet_name.to_string()))?;

    let result = run(engine, &table.select_all()).await?;
    Ok(ExportFile::new(
        format!("{}.csv", table.sheet_name),
        to_csv(&result).into_bytes(),
    ))
}

/// Re-runs the last executed query and exports it as `query-results.csv`.
pub async fn export_query(
    engine: &dyn QueryEngine,
    last_executed: Option<&str>,
) -> Result<ExportFile> {
    let sql = last_executed.ok_or(SheetQueryError::NoQueryExecuted)?;
    let result = run(engine, sql).await?;
    Ok(ExportFile::new(
        QUERY_EXPORT_FILE_NAME,
        to_csv(&result).into_bytes(),
    ))
}

/// Exports every loaded table into one zip archive.
///
/// Any failure aborts the whole export.
pub async fn export_all_sheets(engine: &dyn QueryEngine, schema: &Schema) -> Result<ExportFile> {
    if schema.is_empty() {
        return Err(SheetQueryError::export("No tables to export"));
    }

    let mut entries = Vec::with_capacity(schema.tables.len());
    for table in &schema.tables {
        let result = run(engine, &table.select_all()).await?;
        entries.push((format!("{}.csv", table.sheet_name), to_csv(&result)));
    }

    let bytes = build_zip(&entries)?;
    info!("Built archive with {} sheet(s)", entries.len());
    Ok(ExportFile::new(ALL_SHEETS_ARCHIVE_NAME, bytes))
}

async fn run(engine: &dyn QueryEngine, sql: &str) -> Result<QueryResult> {
    match QueryExecutor::new(engine).execute(sql).await {
        Ok(outcome) => Ok(outcome.result),
        Err(SheetQueryError::QueryFailed(msg)) => Err(SheetQueryError::export(msg)),
        Err(e) => Err(e),
    }
}

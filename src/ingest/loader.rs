//! Relational loading: every sheet of a workbook becomes one table.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::normalize::{build_records, normalize_with};
use super::sanitize::sanitize_table_name;
use crate::db::{QueryEngine, TableSchema};
use crate::error::{Result, SheetQueryError};
use crate::workbook::{Sheet, TextFormats, Workbook};

/// Options controlling how sheets are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Text conversion formats for typed cells.
    pub formats: TextFormats,
}

/// A table created from one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    /// The created table.
    pub table: TableSchema,
    /// Rows inserted after empty-row filtering.
    pub row_count: usize,
}

/// Outcome of loading a workbook.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Tables created, in sheet order.
    pub tables: Vec<LoadedTable>,

    /// Sheets with no header cells, for which no table exists.
    pub empty_sheets: Vec<String>,

    /// Sheets that failed to load (`SheetQueryError::SheetLoad`).
    pub failures: Vec<SheetQueryError>,
}

impl LoadReport {
    /// Returns the created table schemas in sheet order.
    pub fn schemas(&self) -> Vec<TableSchema> {
        self.tables.iter().map(|t| t.table.clone()).collect()
    }

    fn find_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables
            .iter()
            .map(|t| &t.table)
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Replaces the engine's tables with one table per sheet of `workbook`.
///
/// Previously loaded tables are dropped first. A sheet that fails to load is
/// recorded in the report and skipped; the remaining sheets still load.
pub async fn load(
    engine: &dyn QueryEngine,
    workbook: &Workbook,
    options: &LoadOptions,
) -> Result<LoadReport> {
    engine.drop_all_tables().await?;

    let mut report = LoadReport::default();

    for sheet in &workbook.sheets {
        match load_sheet(engine, sheet, &report, options).await {
            Ok(Some(loaded)) => report.tables.push(loaded),
            Ok(None) => {
                debug!("Sheet '{}' has no header row, no table created", sheet.name);
                report.empty_sheets.push(sheet.name.clone());
            }
            Err(e) => {
                warn!("{}", e);
                report.failures.push(e);
            }
        }
    }

    info!(
        "Loaded {} table(s) from {} ({} failed, {} empty)",
        report.tables.len(),
        workbook.file_name,
        report.failures.len(),
        report.empty_sheets.len()
    );
    Ok(report)
}

async fn load_sheet(
    engine: &dyn QueryEngine,
    sheet: &Sheet,
    report: &LoadReport,
    options: &LoadOptions,
) -> Result<Option<LoadedTable>> {
    let table_name = sanitize_table_name(&sheet.name);
    let normalized = normalize_with(&sheet.grid, &options.formats);

    if normalized.clean_headers.is_empty() {
        return Ok(None);
    }

    // SQLite table names are case-insensitive; the first sheet keeps the name.
    if let Some(existing) = report.find_table(&table_name) {
        return Err(SheetQueryError::sheet_load(
            &sheet.name,
            format!(
                "table {} already loaded from sheet '{}'",
                existing.name, existing.sheet_name
            ),
        ));
    }

    let columns = dedupe_columns(&normalized.clean_headers);
    let rows: Vec<Vec<Option<String>>> = build_records(&normalized.rows, &columns, &options.formats)
        .into_iter()
        .map(|record| record.into_values())
        .collect();

    let table = TableSchema::new(&sheet.name, table_name, columns);
    engine
        .create_table(&table, &rows)
        .await
        .map_err(|e| SheetQueryError::sheet_load(&sheet.name, engine_message(e)))?;

    info!(
        "Loaded sheet '{}' as table {} with {} row(s)",
        sheet.name,
        table.name,
        rows.len()
    );

    Ok(Some(LoadedTable {
        table,
        row_count: rows.len(),
    }))
}

/// Makes column names unique, comparing case-insensitively.
///
/// Later duplicates get `_2`, `_3`, ... appended, skipping names already in
/// use.
pub fn dedupe_columns(columns: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
    let mut unique = Vec::with_capacity(columns.len());

    for name in columns {
        let mut candidate = name.clone();
        let mut suffix = 2;
        while seen.contains(&candidate.to_ascii_lowercase()) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        if candidate != *name {
            warn!("Renamed duplicate column {} to {}", name, candidate);
        }
        seen.insert(candidate.to_ascii_lowercase());
        unique.push(candidate);
    }

    unique
}

fn engine_message(error: SheetQueryError) -> String {
    match error {
        SheetQueryError::QueryFailed(msg) => msg,
        other => other.to_string(),
    }
}

//! Spreadsheet file parsing.
//!
//! Binary formats (xlsx, xlsm, xlsb, xls, ods) go through calamine's format
//! auto-detection; `.csv` files are read with the csv crate as a single sheet.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use super::{CellValue, Grid, Sheet, Workbook};
use crate::error::{Result, SheetQueryError};

/// Parses spreadsheet bytes into a workbook.
///
/// `file_name` picks the CSV path for `.csv` names and names the single CSV
/// sheet; every other name is sniffed as a binary workbook. A file with no
/// sheets is a parse error.
pub fn read_workbook(bytes: &[u8], file_name: &str) -> Result<Workbook> {
    let sheets = if is_csv(file_name) {
        vec![read_csv_sheet(bytes, file_name)?]
    } else {
        read_binary_sheets(bytes)?
    };

    if sheets.is_empty() {
        return Err(SheetQueryError::parse("No sheets found in the Excel file"));
    }

    info!("Parsed {} with {} sheet(s)", file_name, sheets.len());
    Ok(Workbook::new(file_name, sheets))
}

/// Reads and parses a spreadsheet file from disk.
pub fn read_workbook_file(path: &Path) -> Result<Workbook> {
    let bytes = std::fs::read(path)
        .map_err(|e| SheetQueryError::parse(format!("Cannot read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_workbook(&bytes, &file_name)
}

fn is_csv(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_binary_sheets(bytes: &[u8]) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SheetQueryError::parse(e.to_string()))?;

    let names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SheetQueryError::parse(format!("Cannot read sheet '{name}': {e}")))?;

        let grid: Grid = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        debug!("Read sheet '{}' with {} grid row(s)", name, grid.len());
        sheets.push(Sheet::new(name, grid));
    }

    Ok(sheets)
}

fn read_csv_sheet(bytes: &[u8], file_name: &str) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid: Grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SheetQueryError::parse(e.to_string()))?;
        grid.push(record.iter().map(CellValue::from).collect());
    }

    let sheet_name = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());

    Ok(Sheet::new(sheet_name, grid))
}

/// Converts a calamine cell to our closed cell variant.
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Absent,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if dt.is_datetime() => CellValue::Date(value),
            _ => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

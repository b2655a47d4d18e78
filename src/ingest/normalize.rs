//! Grid normalization: header row plus data rows into row records.

use super::sanitize::clean_column_name;
use crate::workbook::{CellValue, TextFormats};

/// A sheet grid split into its header and data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSheet {
    /// The grid's first row, as-is.
    pub headers: Vec<CellValue>,

    /// Column identifiers derived from `headers`, one per header cell.
    pub clean_headers: Vec<String>,

    /// Grid rows after the header row.
    pub rows: Vec<Vec<CellValue>>,
}

/// One retained data row, aligned to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: Vec<(String, Option<String>)>,
}

impl RowRecord {
    /// Creates a record from ordered `(column, value)` pairs.
    pub fn new(fields: Vec<(String, Option<String>)>) -> Self {
        Self { fields }
    }

    /// Returns the values in column order.
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.fields.iter().map(|(_, value)| value.as_deref())
    }

    /// Consumes the record, returning the values in column order.
    pub fn into_values(self) -> Vec<Option<String>> {
        self.fields.into_iter().map(|(_, value)| value).collect()
    }

    /// True when at least one value is present and non-empty.
    pub fn has_content(&self) -> bool {
        self.values().any(|v| v.is_some_and(|s| !s.is_empty()))
    }
}

/// Splits a raw grid into headers, clean headers and data rows.
pub fn normalize(grid: &[Vec<CellValue>]) -> NormalizedSheet {
    normalize_with(grid, &TextFormats::default())
}

/// Like [`normalize`], with explicit formats for header text conversion.
pub fn normalize_with(grid: &[Vec<CellValue>], formats: &TextFormats) -> NormalizedSheet {
    let Some((header_row, data_rows)) = grid.split_first() else {
        return NormalizedSheet::default();
    };

    let clean_headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| clean_column_name(cell.to_text(formats).as_deref(), idx))
        .collect();

    NormalizedSheet {
        headers: header_row.clone(),
        clean_headers,
        rows: data_rows.to_vec(),
    }
}

/// Aligns each row to the header width and drops rows with no content.
///
/// Cells past the end of a short row become null; cells past the last header
/// are ignored.
pub fn build_records(
    rows: &[Vec<CellValue>],
    columns: &[String],
    formats: &TextFormats,
) -> Vec<RowRecord> {
    rows.iter()
        .map(|row| {
            let fields = columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let value = row.get(idx).and_then(|cell| cell.to_text(formats));
                    (column.clone(), value)
                })
                .collect();
            RowRecord::new(fields)
        })
        .filter(RowRecord::has_content)
        .collect()
}

//! Workbook model and spreadsheet reading.
//!
//! A workbook is an ordered list of named sheets, each holding the raw grid
//! of cells exactly as the file parser produced it.

mod cell;
mod reader;

pub use cell::{
    format_number, CellValue, TextFormats, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT,
};
pub use reader::{read_workbook, read_workbook_file};

/// A raw grid: rows of cells, first row conventionally the header.
pub type Grid = Vec<Vec<CellValue>>;

/// One named grid of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name as it appears in the file.
    pub name: String,

    /// Raw cell grid.
    pub grid: Grid,
}

impl Sheet {
    /// Creates a sheet with the given name and grid.
    pub fn new(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// Builds a sheet from text cells, treating `None` as an absent cell.
    pub fn from_text_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[Vec<Option<S>>]) -> Self {
        let grid = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(s) => CellValue::Text(s.as_ref().to_string()),
                        None => CellValue::Absent,
                    })
                    .collect()
            })
            .collect();
        Self::new(name, grid)
    }
}

/// All sheets from one loaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    /// Name of the file the workbook came from.
    pub file_name: String,

    /// Sheets in file order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates a workbook from its sheets.
    pub fn new(file_name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets,
        }
    }

    /// Returns the sheet names in file order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

//! Cell values produced by the spreadsheet reader.

use chrono::{NaiveDateTime, NaiveTime};

/// Default format for date cells without a time part.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default format for date cells with a time part.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// No value in the source grid.
    #[default]
    Absent,

    /// Text cell.
    Text(String),

    /// Numeric cell.
    Number(f64),

    /// Boolean cell.
    Boolean(bool),

    /// Date or date-time cell.
    Date(NaiveDateTime),
}

/// Formats used when converting date cells to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormats {
    /// strftime pattern for dates at midnight.
    pub date_format: String,
    /// strftime pattern for dates carrying a time.
    pub datetime_format: String,
}

impl Default for TextFormats {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl CellValue {
    /// Converts the cell to the text stored in the relational layer.
    ///
    /// Blank cells become `None`. Every other variant has exactly one
    /// textual form:
    /// - integral numbers print without a fractional part (`85000`)
    /// - other numbers use the shortest decimal that round-trips
    /// - booleans print as `TRUE` / `FALSE`
    /// - dates use `date_format` at midnight, `datetime_format` otherwise
    pub fn to_text(&self, formats: &TextFormats) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(s) if s.is_empty() => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Date(dt) => {
                let pattern = if dt.time() == NaiveTime::MIN {
                    &formats.date_format
                } else {
                    &formats.datetime_format
                };
                Some(dt.format(pattern).to_string())
            }
        }
    }
}

/// Formats a number the way a spreadsheet displays it in general format.
pub fn format_number(n: f64) -> String {
    // 2^53: beyond this not every integer is representable.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Date(v)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Self::Absent,
        }
    }
}

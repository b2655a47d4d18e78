//! Result sets returned by the query engine.
//!
//! Every loaded column is TEXT, but expressions such as `COUNT(*)` or
//! `1.5 * 2` still come back with SQLite's own storage classes, so values
//! keep those classes until they are rendered.

use std::fmt;
use std::time::Duration;

/// Rows and columns produced by one statement.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,

    pub rows: Vec<Row>,

    /// Wall time spent in the engine.
    pub execution_time: Duration,

    pub row_count: usize,
}

impl QueryResult {
    /// An empty result with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            row_count: rows.len(),
            columns,
            rows,
            ..Self::default()
        }
    }

    pub fn with_execution_time(self, execution_time: Duration) -> Self {
        Self {
            execution_time,
            ..self
        }
    }

    /// True when the statement produced no rows, even if it named columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }
}

/// A result column, named as the statement named it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub type Row = Vec<Value>;

/// One cell of a result set, tagged with its SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text used by both the table view and CSV export.
    ///
    /// NULL is the empty string. Floats print their shortest round-trip
    /// form, so `2.0` becomes `2`. Blobs are summarized by length.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    i64 => Int,
    i32 => Int,
    f64 => Float,
    String => String,
    &str => String,
    Vec<u8> => Bytes,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

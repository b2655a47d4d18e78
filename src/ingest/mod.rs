//! Sheet ingestion: identifier sanitization, grid normalization and
//! relational loading.

mod loader;
mod normalize;
mod sanitize;

pub use loader::{dedupe_columns, load, LoadOptions, LoadReport, LoadedTable};
pub use normalize::{build_records, normalize, normalize_with, NormalizedSheet, RowRecord};
pub use sanitize::{clean_column_name, quote_identifier, sanitize_table_name};

//! Integration tests for sheetquery.

pub mod export_test;
pub mod fixtures;
pub mod load_test;
pub mod query_test;
pub mod shell_test;

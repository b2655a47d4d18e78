//! Relational engine abstraction for sheetquery.
//!
//! Provides a trait-based interface over the engine the sheets are loaded
//! into, so the session and loader can be exercised against test doubles.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::FailingEngine;
pub use schema::{Schema, TableSchema};
pub use sqlite::SqliteEngine;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Creates the default engine: an empty in-memory SQLite database.
pub async fn open_default() -> Result<Box<dyn QueryEngine>> {
    let engine = SqliteEngine::open_in_memory().await?;
    Ok(Box::new(engine))
}

/// Trait defining the interface for relational engines.
///
/// All operations are async and return Results with SheetQueryError.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Executes one SQL statement verbatim and returns its rows.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Creates a table and inserts its rows atomically.
    ///
    /// Each row holds one value per column of `table`, `None` meaning NULL.
    async fn create_table(&self, table: &TableSchema, rows: &[Vec<Option<String>>]) -> Result<()>;

    /// Lists the user tables currently in the engine.
    async fn table_names(&self) -> Result<Vec<String>>;

    /// Drops every user table.
    async fn drop_all_tables(&self) -> Result<()>;

    /// Closes the engine.
    async fn close(&self) -> Result<()>;
}

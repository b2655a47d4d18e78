//! Test double for the engine.
//!
//! Provides an engine that rejects every statement, for exercising the
//! error paths of loading, querying and exporting.

use super::{QueryEngine, QueryResult, TableSchema};
use crate::error::{Result, SheetQueryError};
use async_trait::async_trait;

/// An engine whose every operation fails with the configured message.
#[derive(Debug, Clone)]
pub struct FailingEngine {
    message: String,
}

impl FailingEngine {
    /// Creates a failing engine with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingEngine {
    fn default() -> Self {
        Self::new("engine unavailable")
    }
}

#[async_trait]
impl QueryEngine for FailingEngine {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(SheetQueryError::query(self.message.clone()))
    }

    async fn create_table(&self, _table: &TableSchema, _rows: &[Vec<Option<String>>]) -> Result<()> {
        Err(SheetQueryError::query(self.message.clone()))
    }

    async fn table_names(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn drop_all_tables(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

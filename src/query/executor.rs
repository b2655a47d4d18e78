//! Query execution against the loaded tables.
//!
//! Provides isolated query execution that can be tested independently
//! of the session.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::db::{QueryEngine, QueryResult};
use crate::error::{Result, SheetQueryError};

/// Runs single SQL statements against an engine.
pub struct QueryExecutor<'a> {
    engine: &'a dyn QueryEngine,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(engine: &'a dyn QueryEngine) -> Self {
        Self { engine }
    }

    /// Executes one statement.
    ///
    /// Blank input is rejected without reaching the engine; anything else is
    /// passed through verbatim.
    pub async fn execute(&self, sql: &str) -> Result<QueryOutcome> {
        if sql.trim().is_empty() {
            return Err(SheetQueryError::EmptyQuery);
        }

        let start = Instant::now();
        let result = self.engine.execute_query(sql).await;
        let execution_time = start.elapsed();

        match result {
            Ok(result) => {
                debug!(
                    "Query returned {} row(s) in {:?}",
                    result.row_count, execution_time
                );
                Ok(QueryOutcome {
                    result,
                    execution_time,
                })
            }
            Err(e) => {
                debug!("Query failed after {:?}: {}", execution_time, e);
                Err(match e {
                    SheetQueryError::QueryFailed(_) => e,
                    other => SheetQueryError::query(other.to_string()),
                })
            }
        }
    }
}

/// Successful query execution outcome.
#[derive(Debug)]
pub struct QueryOutcome {
    /// The query result.
    pub result: QueryResult,
    /// How long the query took to execute.
    pub execution_time: Duration,
}

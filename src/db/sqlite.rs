//! SQLite engine implementation.
//!
//! Provides the `SqliteEngine` struct that implements the `QueryEngine` trait
//! over a private in-memory SQLite database using sqlx.

use crate::db::{ColumnInfo, QueryEngine, QueryResult, Row, TableSchema, Value};
use crate::error::{Result, SheetQueryError};
use crate::ingest::quote_identifier;
use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, QueryBuilder, Row as SqlxRow, TypeInfo, ValueRef};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on bound parameters per statement (SQLITE_MAX_VARIABLE_NUMBER).
const MAX_BIND_PARAMS: usize = 32_766;

/// In-memory SQLite engine.
///
/// An in-memory database lives exactly as long as its connection, so the
/// pool holds a single connection that never idles out or expires. Clones
/// share that connection.
#[derive(Debug, Clone)]
pub struct SqliteEngine {
    pool: SqlitePool,
}

impl SqliteEngine {
    /// Opens a fresh, empty in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| SheetQueryError::internal(format!("Invalid engine options: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| SheetQueryError::internal(format!("Failed to open SQLite engine: {e}")))?;

        debug!("Opened in-memory SQLite engine");
        Ok(Self { pool })
    }
}

#[async_trait]
impl QueryEngine for SqliteEngine {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let result = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SheetQueryError::query(format_query_error(&e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name()))
                    .collect()
            })
            .unwrap_or_default();

        // Several statements in one text concatenate their rows.
        if result.iter().any(|row| !same_shape(row, &columns)) {
            return Err(SheetQueryError::query(
                "statements returned results with different columns; run one statement at a time",
            ));
        }

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn create_table(&self, table: &TableSchema, rows: &[Vec<Option<String>>]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SheetQueryError::query(format_query_error(&e)))?;

        sqlx::query(&table.create_statement())
            .execute(&mut *tx)
            .await
            .map_err(|e| SheetQueryError::query(format_query_error(&e)))?;

        if !table.columns.is_empty() && !rows.is_empty() {
            let column_list = table
                .columns
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ");
            let insert_prefix = format!(
                "INSERT INTO {} ({}) ",
                quote_identifier(&table.name),
                column_list
            );
            let rows_per_batch = (MAX_BIND_PARAMS / table.columns.len()).max(1);

            for chunk in rows.chunks(rows_per_batch) {
                let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(insert_prefix.clone());
                builder.push_values(chunk, |mut values, row| {
                    for value in row {
                        values.push_bind(value.clone());
                    }
                });
                builder
                    .build()
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| SheetQueryError::query(format_query_error(&e)))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| SheetQueryError::query(format_query_error(&e)))?;

        debug!("Created table {} with {} row(s)", table.name, rows.len());
        Ok(())
    }

    async fn table_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SheetQueryError::query(format!("Failed to list tables: {e}")))
    }

    async fn drop_all_tables(&self) -> Result<()> {
        // Views go before tables; triggers and indexes go with their table.
        for schema in ["temp", "main"] {
            let objects = sqlx::query_as::<_, (String, String)>(&format!(
                "SELECT type, name FROM {schema}.sqlite_master \
                 WHERE type IN ('view', 'table') AND name NOT LIKE 'sqlite_%' \
                 ORDER BY type = 'table'"
            ))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SheetQueryError::query(format!("Failed to list {schema} objects: {e}")))?;

            for (kind, name) in objects {
                sqlx::query(&format!(
                    "DROP {} IF EXISTS {schema}.{}",
                    kind.to_uppercase(),
                    quote_identifier(&name)
                ))
                .execute(&self.pool)
                .await
                .map_err(|e| SheetQueryError::query(format!("Failed to drop {kind} {name}: {e}")))?;
            }
        }
        debug!("Cleared engine schema");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

fn same_shape(row: &SqliteRow, columns: &[ColumnInfo]) -> bool {
    let row_columns = row.columns();
    row_columns.len() == columns.len()
        && row_columns.iter().zip(columns).all(|(col, info)| col.name() == info.name)
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single value, dispatching on the value's own storage class.
///
/// SQLite is dynamically typed: an expression column has no declared type,
/// so the type of each individual value decides the decoding.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Extracts the engine's own message from a sqlx error.
fn format_query_error(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}

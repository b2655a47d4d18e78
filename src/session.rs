//! Session state for one sheetquery run.
//!
//! The session owns the engine and everything a user has done with it: the
//! loaded workbook's tables, the SQL being edited, the last statement that
//! executed successfully and its result. Loading takes `&mut self`, so no
//! query can observe a half-loaded workbook.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::db::{QueryEngine, QueryResult, Schema, TableSchema};
use crate::error::{Result, SheetQueryError};
use crate::export::{self, ExportFile};
use crate::ingest::{self, quote_identifier, LoadOptions, LoadReport};
use crate::query::QueryExecutor;
use crate::workbook::{read_workbook, read_workbook_file, TextFormats, Workbook};

/// Settings a session is created with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// LIMIT for the per-sheet default query.
    pub page_size: usize,
    /// Cell text conversion formats.
    pub formats: TextFormats,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.query.page_size,
            formats: config.ingest.text_formats(),
        }
    }
}

/// The loaded workbook as the session sees it.
#[derive(Debug, Clone)]
struct LoadedWorkbook {
    file_name: String,
    sheet_names: Vec<String>,
    schema: Schema,
}

/// Process-wide query state, owned by the front end.
pub struct Session {
    engine: Box<dyn QueryEngine>,
    options: SessionOptions,
    workbook: Option<LoadedWorkbook>,
    current_sheet: Option<String>,
    sql_text: String,
    last_executed: Option<String>,
    last_result: Option<QueryResult>,
}

impl Session {
    /// Creates a session with no workbook loaded.
    pub fn new(engine: Box<dyn QueryEngine>, options: SessionOptions) -> Self {
        Self {
            engine,
            options,
            workbook: None,
            current_sheet: None,
            sql_text: String::new(),
            last_executed: None,
            last_result: None,
        }
    }

    /// Parses `bytes` and loads every sheet, replacing the current workbook.
    ///
    /// A file that cannot be parsed leaves the session untouched. On success
    /// the first loaded table becomes the current sheet and its default query
    /// becomes the SQL text; nothing is executed yet.
    pub async fn load_file(&mut self, bytes: &[u8], file_name: &str) -> Result<LoadReport> {
        let workbook = read_workbook(bytes, file_name)?;
        self.load_workbook(&workbook).await
    }

    /// Reads a spreadsheet from disk and loads it.
    pub async fn load_path(&mut self, path: &Path) -> Result<LoadReport> {
        let workbook = read_workbook_file(path)?;
        self.load_workbook(&workbook).await
    }

    /// Loads an already parsed workbook.
    pub async fn load_workbook(&mut self, workbook: &Workbook) -> Result<LoadReport> {
        let options = LoadOptions {
            formats: self.options.formats.clone(),
        };
        let report = ingest::load(self.engine.as_ref(), workbook, &options).await?;

        let schema = Schema::from_tables(report.schemas());
        let first = schema.first().cloned();

        self.workbook = Some(LoadedWorkbook {
            file_name: workbook.file_name.clone(),
            sheet_names: workbook.sheet_names().into_iter().map(str::to_string).collect(),
            schema,
        });
        self.current_sheet = first.as_ref().map(|t| t.sheet_name.clone());
        self.sql_text = first
            .as_ref()
            .map(|t| self.default_query(t))
            .unwrap_or_default();
        self.last_executed = None;
        self.last_result = None;

        info!(
            "Session now holds {} ({} table(s))",
            workbook.file_name,
            report.tables.len()
        );
        Ok(report)
    }

    /// Makes `sheet_name` current and runs its default query.
    pub async fn select_sheet(&mut self, sheet_name: &str) -> Result<&QueryResult> {
        let table = self.table_for_sheet(sheet_name)?.clone();
        self.current_sheet = Some(table.sheet_name.clone());
        self.sql_text = self.default_query(&table);
        self.execute().await
    }

    /// Replaces the SQL text without running it.
    pub fn set_sql_text(&mut self, sql: impl Into<String>) {
        self.sql_text = sql.into();
    }

    /// Runs the current SQL text.
    ///
    /// On success the text becomes the last executed query and the result is
    /// kept. On failure the previous result and last executed query stay.
    pub async fn execute(&mut self) -> Result<&QueryResult> {
        let outcome = QueryExecutor::new(self.engine.as_ref())
            .execute(&self.sql_text)
            .await?;
        self.last_executed = Some(self.sql_text.clone());
        Ok(self.last_result.insert(outcome.result))
    }

    /// Sets the SQL text and runs it.
    pub async fn execute_sql(&mut self, sql: impl Into<String>) -> Result<&QueryResult> {
        self.set_sql_text(sql);
        self.execute().await
    }

    /// Exports one sheet, or the current sheet when `sheet_name` is `None`.
    pub async fn export_sheet(&self, sheet_name: Option<&str>) -> Result<ExportFile> {
        let loaded = self.loaded()?;
        let name = match sheet_name {
            Some(name) => name,
            None => self
                .current_sheet
                .as_deref()
                .ok_or_else(|| SheetQueryError::export("No sheet selected"))?,
        };
        export::export_sheet(self.engine.as_ref(), &loaded.schema, name).await
    }

    /// Exports the last successfully executed query.
    pub async fn export_query(&self) -> Result<ExportFile> {
        export::export_query(self.engine.as_ref(), self.last_executed.as_deref()).await
    }

    /// Exports every loaded table as one zip archive.
    pub async fn export_all(&self) -> Result<ExportFile> {
        let loaded = self.loaded()?;
        export::export_all_sheets(self.engine.as_ref(), &loaded.schema).await
    }

    /// Returns the default query for a table.
    pub fn default_query(&self, table: &TableSchema) -> String {
        format!(
            "SELECT * FROM {} LIMIT {}",
            quote_identifier(&table.name),
            self.options.page_size
        )
    }

    /// Closes the engine.
    pub async fn close(&self) -> Result<()> {
        self.engine.close().await
    }

    pub fn file_name(&self) -> Option<&str> {
        self.workbook.as_ref().map(|w| w.file_name.as_str())
    }

    /// All sheet names of the loaded file, including sheets without a table.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook
            .as_ref()
            .map(|w| w.sheet_names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the loaded schema, or `NoWorkbook`.
    pub fn schema(&self) -> Result<&Schema> {
        Ok(&self.loaded()?.schema)
    }

    pub fn current_sheet(&self) -> Option<&str> {
        self.current_sheet.as_deref()
    }

    pub fn sql_text(&self) -> &str {
        &self.sql_text
    }

    pub fn last_executed(&self) -> Option<&str> {
        self.last_executed.as_deref()
    }

    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    fn loaded(&self) -> Result<&LoadedWorkbook> {
        self.workbook.as_ref().ok_or(SheetQueryError::NoWorkbook)
    }

    fn table_for_sheet(&self, sheet_name: &str) -> Result<&TableSchema> {
        self.loaded()?
            .schema
            .table_for_sheet(sheet_name)
            .ok_or_else(|| SheetQueryError::SheetNotFound(sheet_name.to_string()))
    }
}

//! Table schema types for sheetquery.
//!
//! A schema is the set of tables materialized from the loaded workbook.

use crate::ingest::quote_identifier;

/// One table created from a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    /// The sheet the table was loaded from, unsanitized.
    pub sheet_name: String,

    /// Table name (sanitized sheet name).
    pub name: String,

    /// Column names in declaration order. Every column is stored as TEXT.
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Creates a table schema.
    pub fn new(sheet_name: impl Into<String>, name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            name: name.into(),
            columns,
        }
    }

    /// Returns the `CREATE TABLE` statement for this table.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} TEXT", quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({})", quote_identifier(&self.name), columns)
    }

    /// Returns the query that reads the whole table.
    pub fn select_all(&self) -> String {
        format!("SELECT * FROM {}", quote_identifier(&self.name))
    }
}

/// The set of loaded tables, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// All tables in the schema.
    pub tables: Vec<TableSchema>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema from tables in sheet order.
    pub fn from_tables(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// Finds the table loaded from the given sheet.
    pub fn table_for_sheet(&self, sheet_name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.sheet_name == sheet_name)
    }

    /// Returns the first table, the default target for an initial query.
    pub fn first(&self) -> Option<&TableSchema> {
        self.tables.first()
    }

    /// Returns true if no table is loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Formats the schema for display.
    pub fn format_for_display(&self) -> String {
        if self.tables.is_empty() {
            return "No tables loaded".to_string();
        }

        self.tables
            .iter()
            .map(|table| {
                let origin = if table.sheet_name == table.name {
                    String::new()
                } else {
                    format!(" (sheet \"{}\")", table.sheet_name)
                };
                let columns = table
                    .columns
                    .iter()
                    .map(|c| format!("  - {c}\n"))
                    .collect::<String>();
                format!("Table: {}{}\n{}", table.name, origin, columns)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Help text constants for sheetquery commands.

/// Help text displayed for the /help command.
pub const HELP_TEXT: &str = r#"Available commands:
  /load <path>          - Load a spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv)
  /sheets               - List the sheets of the loaded file
  /use <sheet>          - Select a sheet and show its first rows
  /sql <query>          - Execute SQL (plain input is SQL too)
  /schema               - Show loaded tables and their columns
  /last                 - Show the last executed query
  /help                 - Show this help message
  /quit, /exit          - Exit

Export commands (files go to the output directory):
  /export sheet [name]  - Current or named sheet as <sheet>.csv
  /export query         - Last executed query as query-results.csv
  /export all           - Every sheet in excel-export-all-sheets.zip

Table names are sheet names with every character outside A-Z, a-z, 0-9
and _ replaced by _. Quote names that start with a digit: SELECT * FROM "2024"."#;

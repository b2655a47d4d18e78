//! Command handlers for sheetquery.
//!
//! Each handler takes the command context and returns a `CommandOutput`;
//! errors become error outputs rather than ending the shell.

pub mod export;
pub mod queries;
pub mod system;
pub mod workbook;

use std::path::Path;

use super::output::CommandOutput;
use super::router::Command;
use crate::db::QueryResult;
use crate::export::DisplayTable;
use crate::session::Session;

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    /// The session commands act on.
    pub session: &'a mut Session,
    /// Directory exports are written to.
    pub output_dir: &'a Path,
}

/// Runs one parsed command.
pub async fn dispatch(command: Command, ctx: &mut CommandContext<'_>) -> CommandOutput {
    match command {
        Command::Load(path) => workbook::handle_load(ctx, &path).await,
        Command::Sheets => workbook::handle_sheets(ctx),
        Command::Use(sheet) => workbook::handle_use(ctx, &sheet).await,
        Command::Schema => workbook::handle_schema(ctx),
        Command::Sql(sql) => queries::handle_sql(ctx, sql).await,
        Command::Last => queries::handle_last(ctx),
        Command::Export(request) => export::handle_export(ctx, request).await,
        Command::Help => system::handle_help(),
        Command::Quit => system::handle_quit(),
        Command::Unknown(command) => system::handle_unknown(&command),
    }
}

/// Presents a successful result: the table plus a row count, or the
/// no-results message.
pub fn result_output(result: &QueryResult) -> CommandOutput {
    if result.is_empty() {
        return CommandOutput::info("Query returned no results");
    }

    CommandOutput::multiple(vec![
        CommandOutput::Table(DisplayTable::from_result(result)),
        CommandOutput::info(format!(
            "{} row(s) in {} ms",
            result.row_count,
            result.execution_time.as_millis()
        )),
    ])
}

//! Workbook command handlers (/load, /sheets, /use, /schema).

use std::path::Path;

use super::{result_output, CommandContext};
use crate::commands::output::CommandOutput;
use crate::export::DisplayTable;

/// Handle /load command.
///
/// After loading, the first table's default query runs so the first sheet
/// is shown right away.
pub async fn handle_load(ctx: &mut CommandContext<'_>, path: &str) -> CommandOutput {
    if path.is_empty() {
        return CommandOutput::error("Usage: /load <path>");
    }

    let report = match ctx.session.load_path(Path::new(path)).await {
        Ok(report) => report,
        Err(e) => return CommandOutput::error(e.to_string()),
    };

    let mut outputs: Vec<CommandOutput> = report
        .failures
        .iter()
        .map(|e| CommandOutput::info(format!("Warning: {e}")))
        .collect();
    outputs.extend(
        report
            .empty_sheets
            .iter()
            .map(|name| CommandOutput::info(format!("Sheet '{name}' is empty, no table created"))),
    );

    if !report.tables.is_empty() {
        match ctx.session.execute().await {
            Ok(result) if !result.is_empty() => {
                outputs.push(CommandOutput::Table(DisplayTable::from_result(result)));
            }
            Ok(_) => {}
            Err(e) => outputs.push(CommandOutput::error(e.to_string())),
        }
    }

    let file_name = ctx.session.file_name().unwrap_or(path).to_string();
    outputs.push(CommandOutput::info(format!(
        "Loaded file: {} with {} sheet(s)",
        file_name,
        ctx.session.sheet_names().len()
    )));
    CommandOutput::multiple(outputs)
}

/// Handle /sheets command.
pub fn handle_sheets(ctx: &CommandContext<'_>) -> CommandOutput {
    let schema = match ctx.session.schema() {
        Ok(schema) => schema,
        Err(e) => return CommandOutput::error(e.to_string()),
    };
    let current = ctx.session.current_sheet();

    let lines: Vec<String> = ctx
        .session
        .sheet_names()
        .into_iter()
        .map(|name| {
            let marker = if Some(name) == current { "*" } else { " " };
            match schema.table_for_sheet(name) {
                Some(table) => format!("{marker} {name} -> {}", table.name),
                None => format!("{marker} {name} (no table)"),
            }
        })
        .collect();

    CommandOutput::info(lines.join("\n"))
}

/// Handle /use command.
pub async fn handle_use(ctx: &mut CommandContext<'_>, sheet: &str) -> CommandOutput {
    if sheet.is_empty() {
        return CommandOutput::error("Usage: /use <sheet>");
    }

    match ctx.session.select_sheet(sheet).await {
        Ok(result) => result_output(result),
        Err(e) => CommandOutput::error(e.to_string()),
    }
}

/// Handle /schema command.
pub fn handle_schema(ctx: &CommandContext<'_>) -> CommandOutput {
    match ctx.session.schema() {
        Ok(schema) => CommandOutput::info(schema.format_for_display()),
        Err(e) => CommandOutput::error(e.to_string()),
    }
}

//! Query command handlers (SQL input, /last).

use super::{result_output, CommandContext};
use crate::commands::output::CommandOutput;

/// Handle SQL typed at the prompt or passed to /sql.
pub async fn handle_sql(ctx: &mut CommandContext<'_>, sql: String) -> CommandOutput {
    match ctx.session.execute_sql(sql).await {
        Ok(result) => result_output(result),
        Err(e) => CommandOutput::error(e.to_string()),
    }
}

/// Handle /last command.
pub fn handle_last(ctx: &CommandContext<'_>) -> CommandOutput {
    match ctx.session.last_executed() {
        Some(sql) => CommandOutput::info(sql),
        None => CommandOutput::info("No query executed yet"),
    }
}

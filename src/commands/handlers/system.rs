//! System command handlers (/help, /quit, unknown input).

use crate::commands::help::HELP_TEXT;
use crate::commands::output::CommandOutput;

/// Handle /help command.
pub fn handle_help() -> CommandOutput {
    CommandOutput::info(HELP_TEXT)
}

/// Handle /quit or /exit command.
pub fn handle_quit() -> CommandOutput {
    CommandOutput::exit()
}

/// Handle unknown command.
pub fn handle_unknown(command: &str) -> CommandOutput {
    CommandOutput::error(format!(
        "Unknown command: {}. Type /help for available commands.",
        command
    ))
}

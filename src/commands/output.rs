//! What a command produced, before anything is printed.
//!
//! The shell renders these as text; the status line keeps only the last
//! info or error message.

use crate::export::DisplayTable;

/// Result of dispatching one shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Info(String),
    Error(String),
    /// Rows of a query, already rendered to text cells.
    Table(DisplayTable),
    Control(ControlAction),
    /// Several parts shown in order, e.g. load warnings then a table.
    Multiple(Vec<CommandOutput>),
    None,
}

/// Requests aimed at the shell loop rather than the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Exit,
}

impl From<ControlAction> for CommandOutput {
    fn from(action: ControlAction) -> Self {
        Self::Control(action)
    }
}

impl CommandOutput {
    pub fn info(text: impl Into<String>) -> Self {
        Self::Info(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    pub fn multiple(parts: Vec<CommandOutput>) -> Self {
        Self::Multiple(parts)
    }

    pub fn exit() -> Self {
        ControlAction::Exit.into()
    }

    /// Returns true if this output (or any nested output) asks to exit.
    pub fn is_exit(&self) -> bool {
        match self {
            Self::Control(ControlAction::Exit) => true,
            Self::Multiple(outputs) => outputs.iter().any(Self::is_exit),
            _ => false,
        }
    }

    /// Returns the last info or error message, the one the status line shows.
    pub fn status(&self) -> Option<StatusMessage> {
        match self {
            Self::Info(msg) => Some(StatusMessage::Info(msg.clone())),
            Self::Error(msg) => Some(StatusMessage::Error(msg.clone())),
            Self::Multiple(outputs) => outputs.iter().rev().find_map(Self::status),
            _ => None,
        }
    }
}

/// The one message left standing after an action. An info and an error
/// never show together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

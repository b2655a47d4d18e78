//! Command parsing and dispatch for the sheetquery shell.
//!
//! Parsing is kept apart from execution so command parsing can be unit
//! tested without loading a workbook.

pub mod handlers;
pub mod help;
pub mod output;
pub mod router;

pub use handlers::{dispatch, CommandContext};
pub use output::{CommandOutput, ControlAction, StatusMessage};
pub use router::{Command, CommandRouter, ExportRequest};

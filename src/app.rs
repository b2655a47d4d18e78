//! Core orchestrator for sheetquery.
//!
//! Coordinates the session, the command router and the output directory.
//! It implements both the interactive shell loop and one-shot runs.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::cli::{ExportTarget, OutputFormat};
use crate::commands::{dispatch, CommandContext, CommandOutput, CommandRouter, StatusMessage};
use crate::config::Config;
use crate::db::{self, QueryResult};
use crate::error::{Result, SheetQueryError};
use crate::export::DisplayTable;
use crate::ingest::LoadReport;
use crate::session::{Session, SessionOptions};

/// Prompt printed before each shell line.
pub const PROMPT: &str = "sheetquery> ";

/// The main orchestrator that coordinates all components.
pub struct App {
    session: Session,
    output_dir: PathBuf,
    /// The single info or error message from the last action.
    status: Option<StatusMessage>,
}

impl App {
    /// Creates an app around an existing session.
    pub fn new(session: Session, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            output_dir: output_dir.into(),
            status: None,
        }
    }

    /// Creates an app with the default engine, configured from `config`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let engine = db::open_default().await?;
        let session = Session::new(engine, SessionOptions::from_config(config));
        Ok(Self::new(session, config.export.output_dir.clone()))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The message from the last action, if it produced one.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Handles one line of shell input.
    ///
    /// Blank lines do nothing. Otherwise the status is replaced by whatever
    /// the command reports, so an info and an error never show together.
    pub async fn handle_line(&mut self, line: &str) -> CommandOutput {
        if line.trim().is_empty() {
            return CommandOutput::None;
        }

        let command = CommandRouter::parse(line);
        debug!("Dispatching {:?}", command);

        let mut ctx = CommandContext {
            session: &mut self.session,
            output_dir: &self.output_dir,
        };
        let output = dispatch(command, &mut ctx).await;

        self.status = output.status();
        output
    }

    /// Runs the interactive shell until `/quit` or end of input.
    pub async fn run_shell<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        output.write_all(b"sheetquery - type /help for commands\n").await?;
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let result = self.handle_line(&line).await;
            let rendered = render_output(&result);
            if !rendered.is_empty() {
                output.write_all(rendered.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }

            if result.is_exit() {
                break;
            }
        }
        output.flush().await?;

        self.session.close().await
    }
}

/// Renders command output for the terminal.
pub fn render_output(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Info(msg) | CommandOutput::Error(msg) => msg.clone(),
        CommandOutput::Table(table) => table.render_text(),
        CommandOutput::Multiple(outputs) => outputs
            .iter()
            .map(render_output)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        CommandOutput::Control(_) | CommandOutput::None => String::new(),
    }
}

/// Renders a result in the requested output format.
pub fn format_result(result: &QueryResult, format: OutputFormat) -> Result<String> {
    let table = DisplayTable::from_result(result);
    match format {
        OutputFormat::Text if table.is_empty() => Ok("Query returned no results".to_string()),
        OutputFormat::Text => Ok(table.render_text()),
        OutputFormat::Json => serde_json::to_string_pretty(&table)
            .map_err(|e| SheetQueryError::internal(format!("Failed to encode JSON: {e}"))),
    }
}

/// What a one-shot run should do after loading its file.
#[derive(Debug, Clone, Default)]
pub struct OneShotRequest {
    /// SQL to run instead of the sheet's default query.
    pub sql: Option<String>,
    /// Sheet to select instead of the first one.
    pub sheet: Option<String>,
    /// Export to write instead of printing.
    pub export: Option<ExportTarget>,
}

/// What a one-shot run produced.
#[derive(Debug)]
pub enum OneShotOutcome {
    /// A result to print.
    Result(QueryResult),
    /// The path of a written export.
    Exported(PathBuf),
}

/// Loads `path`, runs one query and either returns its result or writes an
/// export.
///
/// The query is `request.sql` when given, else the default query of the
/// selected sheet (or the first loaded sheet). `--export query` exports
/// that query.
pub async fn run_one_shot(
    session: &mut Session,
    path: &Path,
    request: &OneShotRequest,
    output_dir: &Path,
) -> Result<OneShotOutcome> {
    let report = session.load_path(path).await?;
    log_load_report(&report);

    if report.tables.is_empty() && request.sql.is_none() {
        return Err(SheetQueryError::parse(format!(
            "No tables could be loaded from {}",
            path.display()
        )));
    }

    let result = match (&request.sql, &request.sheet) {
        (Some(sql), _) => session.execute_sql(sql.clone()).await?.clone(),
        (None, Some(sheet)) => session.select_sheet(sheet).await?.clone(),
        (None, None) => session.execute().await?.clone(),
    };

    let Some(target) = request.export else {
        return Ok(OneShotOutcome::Result(result));
    };

    let file = match target {
        ExportTarget::Sheet => session.export_sheet(request.sheet.as_deref()).await?,
        ExportTarget::Query => session.export_query().await?,
        ExportTarget::All => session.export_all().await?,
    };
    Ok(OneShotOutcome::Exported(file.save_to(output_dir)?))
}

fn log_load_report(report: &LoadReport) {
    for failure in &report.failures {
        warn!("{}", failure);
    }
    for sheet in &report.empty_sheets {
        warn!("Sheet '{}' is empty, no table created", sheet);
    }
}

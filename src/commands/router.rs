//! Command parsing and routing for sheetquery.
//!
//! Parses shell input into structured commands that can be dispatched to
//! handlers. Anything that is not a slash command is SQL.

/// What `/export` should write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRequest {
    /// One sheet; the current sheet when no name is given.
    Sheet(Option<String>),
    /// The last executed query.
    Query,
    /// Every sheet as a zip archive.
    All,
}

/// Parsed command with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a spreadsheet file.
    Load(String),
    /// List the sheets of the loaded file.
    Sheets,
    /// Select a sheet and run its default query.
    Use(String),
    /// Execute SQL.
    Sql(String),
    /// Display the loaded tables and columns.
    Schema,
    /// Export results to the output directory.
    Export(ExportRequest),
    /// Show the last executed query.
    Last,
    /// Show help message.
    Help,
    /// Exit the shell.
    Quit,
    /// Unknown command or malformed arguments.
    Unknown(String),
}

/// Command router for parsing user input.
pub struct CommandRouter;

impl CommandRouter {
    /// Parse user input into a Command.
    pub fn parse(input: &str) -> Command {
        let input = input.trim();

        if !input.starts_with('/') {
            return Command::Sql(input.to_string());
        }

        let (command, args) = match input.split_once(char::is_whitespace) {
            Some((command, args)) => (command.to_lowercase(), args.trim()),
            None => (input.to_lowercase(), ""),
        };

        match command.as_str() {
            "/load" | "/open" => Command::Load(unquote(args).to_string()),
            "/sheets" => Command::Sheets,
            "/use" => Command::Use(unquote(args).to_string()),
            "/sql" => Command::Sql(args.to_string()),
            "/schema" => Command::Schema,
            "/export" => Self::parse_export_command(args),
            "/last" => Command::Last,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Unknown(command),
        }
    }

    /// Parse /export subcommands.
    fn parse_export_command(args: &str) -> Command {
        let (subcommand, rest) = match args.split_once(char::is_whitespace) {
            Some((sub, rest)) => (sub.to_lowercase(), rest.trim()),
            None => (args.to_lowercase(), ""),
        };

        match subcommand.as_str() {
            "sheet" if rest.is_empty() => Command::Export(ExportRequest::Sheet(None)),
            "sheet" => Command::Export(ExportRequest::Sheet(Some(unquote(rest).to_string()))),
            "query" if rest.is_empty() => Command::Export(ExportRequest::Query),
            "all" if rest.is_empty() => Command::Export(ExportRequest::All),
            _ => Command::Unknown("/export".to_string()),
        }
    }
}

/// Strips one pair of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

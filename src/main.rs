//! sheetquery - query spreadsheet files with SQL.

use std::path::Path;

use anyhow::Context;
use sheetquery::app::{format_result, render_output, run_one_shot, App, OneShotOutcome, OneShotRequest};
use sheetquery::cli::Cli;
use sheetquery::config::Config;
use sheetquery::error::SheetQueryError;
use sheetquery::logging;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let interactive = cli.is_interactive();

    if interactive {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(cli).await {
        let category = e
            .downcast_ref::<SheetQueryError>()
            .map(SheetQueryError::category)
            .unwrap_or("Error");
        error!("{}: {:#}", category, e);
        if interactive {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    let mut app = App::from_config(&config)
        .await
        .context("Failed to start the query engine")?;

    match cli.file.as_deref() {
        Some(file) if !cli.is_interactive() => run_once(&cli, &mut app, file).await,
        file => {
            if let Some(file) = file {
                let output = app.handle_line(&format!("/load {}", file.display())).await;
                println!("{}", render_output(&output));
            }
            let stdin = BufReader::new(tokio::io::stdin());
            app.run_shell(stdin, tokio::io::stdout()).await?;
            Ok(())
        }
    }
}

async fn run_once(cli: &Cli, app: &mut App, file: &Path) -> anyhow::Result<()> {
    let request = OneShotRequest {
        sql: cli.sql.clone(),
        sheet: cli.sheet.clone(),
        export: cli.export,
    };
    let output_dir = app.output_dir().to_path_buf();

    let outcome = run_one_shot(app.session_mut(), file, &request, &output_dir)
        .await
        .with_context(|| format!("Failed to query {}", file.display()))?;

    match outcome {
        OneShotOutcome::Result(result) => println!("{}", format_result(&result, cli.format)?),
        OneShotOutcome::Exported(path) => println!("Exported {}", path.display()),
    }

    app.session().close().await?;
    Ok(())
}

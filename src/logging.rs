//! Tracing setup.
//!
//! The interactive shell logs to a file so diagnostics do not interleave
//! with the prompt; one-shot runs log to stderr, leaving stdout for results.
//! `RUST_LOG` overrides the default `info` level in both modes.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "sheetquery.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends logs to [`get_log_path`], truncating the previous run's log.
///
/// Logging is skipped with a warning on stderr if the file cannot be
/// created.
pub fn init_file_logging() {
    let path = get_log_path();
    match open_log_file(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(file)
            .with_ansi(false)
            .init(),
        Err(e) => eprintln!("Warning: logging disabled, cannot write {}: {e}", path.display()),
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    File::create(path)
}

pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

/// `<state dir>/sheetquery/sheetquery.log`, falling back to the config dir
/// and then the temp dir on platforms without a state dir.
pub fn get_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|base| base.join("sheetquery").join(LOG_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

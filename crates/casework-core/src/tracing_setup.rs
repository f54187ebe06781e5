use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter directives for the stderr layer, e.g. `casework_core=debug`
pub const LOG_FILTER_ENV: &str = "CASEWORK_LOG";

/// When set, everything at DEBUG and above is also appended to this file
pub const LOG_FILE_ENV: &str = "CASEWORK_LOG_FILE";

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum TracingSetupError {
    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Install the global subscriber. Returns the log file path when file
/// logging is enabled.
pub fn init_tracing() -> Result<Option<PathBuf>, TracingSetupError> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let file_path = std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty());

    let file_layer = match &file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TracingSetupError::OpenLogFile {
                    path: path.clone(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(file_path.map(PathBuf::from))
}

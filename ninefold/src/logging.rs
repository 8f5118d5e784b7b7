//! Tracing subscriber setup.
//!
//! Logs go to stderr and, when a directory is configured, to
//! `<directory>/ninefold.log` through a non-blocking writer. The
//! `NINEFOLD_LOG` environment variable overrides the configured level with
//! any `EnvFilter` directive string, e.g. `NINEFOLD_LOG=ninefold::pyramid=debug`.

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self, time::LocalTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Environment variable overriding the configured filter.
pub const LOG_ENV_VAR: &str = "NINEFOLD_LOG";

/// File name of the log file inside the configured directory.
pub const LOG_FILE_NAME: &str = "ninefold.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directives}': {reason}")]
    InvalidFilter { directives: String, reason: String },

    #[error("Could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the file writer alive. Buffered lines are flushed on drop, so
/// hold it until the program exits.
#[must_use]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directives in effect: the environment override when set and
/// non-empty, else the configured level.
pub fn filter_directives(level: &str, env_override: Option<&str>) -> String {
    match env_override.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => level.to_string(),
    }
}

fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let directives = filter_directives(level, env.as_deref());
    EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidFilter {
        directives,
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
pub fn init(settings: &LoggingSettings) -> Result<LoggingGuard, LoggingError> {
    let filter = env_filter(&settings.level)?;

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false);

    let (file, guard) = match &settings.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).map_err(|source| LoggingError::CreateDir {
                path: directory.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::never(directory, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { _file: guard })
}

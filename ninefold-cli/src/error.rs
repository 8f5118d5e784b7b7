//! CLI error type.

use thiserror::Error;

use ninefold::config::ConfigError;
use ninefold::logging::LoggingError;
use ninefold::map::MapError;
use ninefold::pyramid::PyramidError;

/// Errors surfaced to the user by the `ninefold` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration or argument combination.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("Build failed: {0}")]
    Build(#[from] PyramidError),

    #[error(transparent)]
    Map(#[from] MapError),
}

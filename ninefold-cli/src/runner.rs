//! Shared startup for commands: configuration file and logging.

use std::path::Path;

use ninefold::config::{ConfigFile, LoggingSettings};
use ninefold::logging::{self, LoggingGuard};
use tracing::{debug, info};

use crate::error::CliError;

/// Loaded configuration plus the logging guard, held for the whole run.
pub struct CliRunner {
    config: ConfigFile,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Load the configuration (from `config_path` or the default location)
    /// and install logging.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        let logging = logging::init(&config.logging)?;
        Ok(Self {
            config,
            _logging: logging,
        })
    }

    /// Install logging only, with default settings.
    pub fn without_config() -> Result<Self, CliError> {
        let logging = logging::init(&LoggingSettings::default())?;
        Ok(Self {
            config: ConfigFile::default(),
            _logging: logging,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            command, "ninefold starting"
        );
        debug!(config = ?self.config, "Effective configuration");
    }
}

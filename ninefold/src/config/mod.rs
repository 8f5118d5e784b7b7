//! INI configuration file.
//!
//! The file lives at `<config dir>/ninefold/config.ini` and holds defaults
//! for builds and logging:
//!
//! ```ini
//! [pyramid]
//! max_survey = 4
//! content_policy = pass-through
//! filter = nearest
//! parallel = false
//!
//! [logging]
//! level = info
//! directory = /var/log/ninefold
//! ```
//!
//! Missing keys keep their defaults. A missing file is not an error.

mod keys;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::objects::ContentPolicy;
use crate::pyramid::{BuildConfig, DEFAULT_MAX_SURVEY};
use crate::raster::ScaleFilter;

pub use keys::ConfigKey;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors from reading, writing or interpreting the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: ConfigKey,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[pyramid]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyramidSettings {
    pub max_survey: u32,
    pub content_policy: ContentPolicy,
    pub filter: ScaleFilter,
    pub parallel: bool,
}

impl Default for PyramidSettings {
    fn default() -> Self {
        Self {
            max_survey: DEFAULT_MAX_SURVEY,
            content_policy: ContentPolicy::default(),
            filter: ScaleFilter::default(),
            parallel: false,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    /// Directory for a log file. Console only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub pyramid: PyramidSettings,
    pub logging: LoggingSettings,
}

/// `<config dir>/ninefold`, if the platform has a config directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ninefold"))
}

/// Default location of the configuration file.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Interpret a parsed INI document.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::ALL {
            if let Some(value) = ini.get_from(Some(key.section()), key.name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Render as an INI document. Unset optional keys are omitted.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::ALL {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section())).set(key.name(), value);
            }
        }
        ini
    }

    /// Save to the default location, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    /// Build options from the `[pyramid]` section.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::default()
            .with_max_survey(self.pyramid.max_survey)
            .with_content_policy(self.pyramid.content_policy)
            .with_filter(self.pyramid.filter)
            .with_parallel(self.pyramid.parallel)
    }
}

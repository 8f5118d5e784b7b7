//! Typed access to individual configuration settings by `section.key`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One setting of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    PyramidMaxSurvey,
    PyramidContentPolicy,
    PyramidFilter,
    PyramidParallel,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::PyramidMaxSurvey,
        ConfigKey::PyramidContentPolicy,
        ConfigKey::PyramidFilter,
        ConfigKey::PyramidParallel,
        ConfigKey::LoggingLevel,
        ConfigKey::LoggingDirectory,
    ];

    pub fn section(self) -> &'static str {
        match self {
            ConfigKey::PyramidMaxSurvey
            | ConfigKey::PyramidContentPolicy
            | ConfigKey::PyramidFilter
            | ConfigKey::PyramidParallel => "pyramid",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::PyramidMaxSurvey => "max_survey",
            ConfigKey::PyramidContentPolicy => "content_policy",
            ConfigKey::PyramidFilter => "filter",
            ConfigKey::PyramidParallel => "parallel",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Current value as written to the file; empty when unset.
    pub fn get(self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PyramidMaxSurvey => config.pyramid.max_survey.to_string(),
            ConfigKey::PyramidContentPolicy => config.pyramid.content_policy.to_string(),
            ConfigKey::PyramidFilter => config.pyramid.filter.to_string(),
            ConfigKey::PyramidParallel => config.pyramid.parallel.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse `value` and store it in `config`.
    pub fn set(self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: self,
            value: value.to_string(),
            reason,
        };
        let value = value.trim();

        match self {
            ConfigKey::PyramidMaxSurvey => {
                config.pyramid.max_survey = value
                    .parse()
                    .map_err(|_| invalid("expected a non-negative integer".to_string()))?;
            }
            ConfigKey::PyramidContentPolicy => {
                config.pyramid.content_policy = value.parse().map_err(invalid)?;
            }
            ConfigKey::PyramidFilter => {
                config.pyramid.filter = value.parse().map_err(invalid)?;
            }
            ConfigKey::PyramidParallel => {
                config.pyramid.parallel = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    _ => return Err(invalid("expected true or false".to_string())),
                };
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(invalid(format!("expected one of {}", LOG_LEVELS.join(", "))));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.to_string() == s.trim())
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ContentPolicy;

    #[test]
    fn test_parse_key() {
        assert_eq!(
            "pyramid.max_survey".parse::<ConfigKey>().unwrap(),
            ConfigKey::PyramidMaxSurvey
        );
        assert_eq!(
            "logging.directory".parse::<ConfigKey>().unwrap(),
            ConfigKey::LoggingDirectory
        );
        assert!(matches!(
            "pyramid.depth".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = ConfigFile::default();
        ConfigKey::PyramidContentPolicy
            .set(&mut config, "cull")
            .unwrap();
        assert_eq!(config.pyramid.content_policy, ContentPolicy::CullAndScale);
        assert_eq!(ConfigKey::PyramidContentPolicy.get(&config), "cull-and-scale");

        ConfigKey::LoggingLevel.set(&mut config, "WARN").unwrap();
        assert_eq!(ConfigKey::LoggingLevel.get(&config), "warn");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::PyramidMaxSurvey.set(&mut config, "-1").is_err());
        assert!(ConfigKey::LoggingLevel.set(&mut config, "loud").is_err());
        assert!(ConfigKey::PyramidFilter.set(&mut config, "bicubic").is_err());
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_empty_directory_unsets() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingDirectory.set(&mut config, "/var/log").unwrap();
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "/var/log");
        ConfigKey::LoggingDirectory.set(&mut config, "").unwrap();
        assert_eq!(config.logging.directory, None);
    }
}

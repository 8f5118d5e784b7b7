//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path`
//! for viewing and editing the configuration file from the command line.

use clap::Subcommand;
use ninefold::config::{config_file_path, ConfigError, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., pyramid.max_survey)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., pyramid.max_survey)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'ninefold config list' to see available keys.",
            key
        ))
    })
}

fn run_get(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let config = ConfigFile::load()?;
    let value = key.get(&config);

    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut config = ConfigFile::load()?;
    key.set(&mut config, value)?;
    config.save()?;

    println!("Set {} = {}", key, key.get(&config));
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    for line in list_lines(&config) {
        println!("{}", line);
    }
    Ok(())
}

/// Settings grouped by section, as printed by `config list`.
fn list_lines(config: &ConfigFile) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_section = "";

    for key in ConfigKey::ALL {
        let section = key.section();
        if section != current_section {
            if !current_section.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!("[{}]", section));
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            lines.push(format!("  {} = (not set)", key.name()));
        } else {
            lines.push(format!("  {} = {}", key.name(), value));
        }
    }
    lines
}

fn run_path() -> Result<(), CliError> {
    let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
    println!("{}", path.display());
    Ok(())
}

//! Configuration loading and data folder resolution
//!
//! Input and output file names are fixed per pipeline. Only the folder that
//! holds them is configurable, resolved in priority order:
//! 1. `DATAFIX_DATA_DIR` environment variable
//! 2. `data_dir` in a TOML config file (`./datafix.toml`, then the user
//!    config directory's `datafix/config.toml`)
//! 3. Current working directory
//!
//! A missing config file is normal. An unreadable or invalid one produces a
//! warning and falls back to defaults; it never stops a run.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the data folder
pub const DATA_DIR_ENV: &str = "DATAFIX_DATA_DIR";

/// Config file looked up in the current working directory
pub const LOCAL_CONFIG_FILE: &str = "datafix.toml";

/// Contents of a datafix TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the input and output JSON files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Locate the first existing config file
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("datafix").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Resolved settings for one pipeline run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Folder holding the input and output JSON files
    pub data_dir: PathBuf,

    pub logging: LoggingConfig,

    /// Config file the settings were read from, if any
    pub config_file: Option<PathBuf>,

    /// Problems met while resolving, to be logged once tracing is up
    pub warnings: Vec<String>,
}

impl Settings {
    /// Resolve settings from the process environment and config files
    pub fn resolve() -> Self {
        let env_value = std::env::var(DATA_DIR_ENV).ok();
        let config_file = find_config_file();

        let mut warnings = Vec::new();
        let toml_config = config_file.as_deref().and_then(|path| match load_toml_config(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warnings.push(format!("Ignoring config file {}: {}", path.display(), e));
                None
            }
        });

        let mut settings = Self::from_sources(env_value, toml_config);
        settings.config_file = config_file;
        settings.warnings = warnings;
        settings
    }

    /// Combine already-read sources by priority
    pub fn from_sources(env_value: Option<String>, toml_config: Option<TomlConfig>) -> Self {
        let toml_config = toml_config.unwrap_or_default();

        // Priority 1: Environment variable (empty counts as unset)
        let data_dir = match env_value.filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            // Priority 2: TOML config file, then 3: current directory
            None => toml_config.data_dir.unwrap_or_else(|| PathBuf::from(".")),
        };

        Self {
            data_dir,
            logging: toml_config.logging,
            config_file: None,
            warnings: Vec::new(),
        }
    }

    /// Full path of a fixed file name inside the data folder
    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value_takes_priority_over_toml() {
        let toml_config = TomlConfig {
            data_dir: Some(PathBuf::from("/srv/from-toml")),
            logging: LoggingConfig::default(),
        };
        let settings = Settings::from_sources(Some("/srv/from-env".to_string()), Some(toml_config));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/from-env"));
    }

    #[test]
    fn test_toml_used_when_env_missing_or_blank() {
        let toml_config = TomlConfig {
            data_dir: Some(PathBuf::from("/srv/from-toml")),
            logging: LoggingConfig::default(),
        };
        let settings = Settings::from_sources(Some("  ".to_string()), Some(toml_config));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/from-toml"));
    }

    #[test]
    fn test_defaults_to_current_directory() {
        let settings = Settings::from_sources(None, None);
        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.data_file("users.json"), PathBuf::from("./users.json"));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: TomlConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(config.data_dir.is_none());
        assert_eq!(config.logging.level, "debug");

        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
    }
}

//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables (`DOC_LANG`)
//! - Command-line arguments

use crate::error::{Error, Result};
use autodoc_core::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable selecting the document language
pub const LANG_ENV: &str = "DOC_LANG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document language code (`english` or `chinese`)
    pub lang: Option<String>,

    /// Title used when the manifest has none
    pub title: Option<String>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default document path for `generate`
    pub path: PathBuf,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: None,
            title: None,
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("api.md"),
            color: true,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".autodoc.yaml"),
            PathBuf::from(".autodoc.json"),
            PathBuf::from("autodoc.yaml"),
            PathBuf::from("autodoc.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let autodoc_dir = config_dir.join("autodoc");
            paths.push(autodoc_dir.join("config.yaml"));
            paths.push(autodoc_dir.join("config.json"));
        }

        paths
    }

    /// Pick the document locale.
    ///
    /// Precedence: the command-line code, then `DOC_LANG`, then the
    /// configured `lang`. Unknown or missing codes select the default locale.
    pub fn locale(&self, cli_lang: Option<&str>) -> Locale {
        let env_lang = std::env::var(LANG_ENV).ok();
        self.locale_with_env(cli_lang, env_lang.as_deref())
    }

    fn locale_with_env(&self, cli_lang: Option<&str>, env_lang: Option<&str>) -> Locale {
        let code = cli_lang
            .or(env_lang)
            .or(self.lang.as_deref())
            .unwrap_or_default();
        Locale::from_code(code)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

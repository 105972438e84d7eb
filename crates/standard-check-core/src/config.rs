//! Configuration types for standard-check.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default name of the ignore file looked up at the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".standardignore";

/// Top-level configuration for standard-check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the configuration for a rule, if any.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Ignore file name, relative to the root.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: PathBuf,

    /// File extensions to check, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Extra glob patterns to exclude, merged with the ignore file's.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            ignore_file: default_ignore_file(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            respect_gitignore: false,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_ignore_file() -> PathBuf {
    PathBuf::from(DEFAULT_IGNORE_FILE)
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

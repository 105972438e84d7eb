//! Locating and loading the configuration for a run.
//!
//! The first existing file among these candidates wins:
//!
//! 1. the `--config` path (must exist)
//! 2. `standard-check.toml`, then `.standard-check.toml`, in the project
//! 3. `config.toml` in `$STANDARD_CHECK_CONFIG_DIR`, else `~/.standard-check/`
//!
//! With no file anywhere the built-in defaults apply.

use anyhow::{Context, Result};
use standard_check_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["standard-check.toml", ".standard-check.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "STANDARD_CHECK_CONFIG_DIR";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Given with `--config`.
    Flag(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// No file; defaults.
    BuiltIn,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{}", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

/// A parsed configuration and the file it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Parsed configuration.
    pub config: Config,
    /// Where it came from.
    pub origin: ConfigOrigin,
}

/// Finds and parses the configuration for `project_dir`.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed, including
/// an explicit `--config` path that does not exist.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let global_dir = std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".standard-check")));
    load_from(project_dir, explicit, global_dir.as_deref())
}

fn load_from(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let origin = locate(project_dir, explicit, global_dir);
    let config = match &origin {
        ConfigOrigin::BuiltIn => Config::default(),
        ConfigOrigin::Flag(path) | ConfigOrigin::Project(path) | ConfigOrigin::Global(path) => {
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
    };
    tracing::debug!("Using configuration from {origin}");
    Ok(LoadedConfig { config, origin })
}

fn locate(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigOrigin {
    if let Some(path) = explicit {
        return ConfigOrigin::Flag(path.to_path_buf());
    }
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
        .map(ConfigOrigin::Project)
        .or_else(|| {
            global_dir
                .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
                .filter(|path| path.is_file())
                .map(ConfigOrigin::Global)
        })
        .unwrap_or(ConfigOrigin::BuiltIn)
}

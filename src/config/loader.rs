//! Configuration file discovery and loading.
//!
//! The first file found wins; files are never merged:
//! 1. `--config <file>` (or `PATHREG_CONFIG`)
//! 2. `./.pathreg.yml`
//! 3. `<config_dir>/pathreg/config.yml`

use crate::config::schema::PathregConfig;
use crate::error::{PathregError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local config file name.
pub const PROJECT_CONFIG: &str = ".pathreg.yml";

/// Environment variable overriding the user-scope profile file.
pub const PROFILE_ENV: &str = "PATHREG_PROFILE";

/// Environment variable overriding the machine-scope profile file.
pub const MACHINE_PROFILE_ENV: &str = "PATHREG_MACHINE_PROFILE";

/// Environment variable overriding `settings.base_path`.
pub const BASE_PATH_ENV: &str = "PATHREG_BASE_PATH";

/// A parsed configuration and the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: PathregConfig,
    /// `None` when no file was found and defaults are in use.
    pub source: Option<PathBuf>,
}

/// Find the config file to use, without reading it.
///
/// An explicit path is returned as-is, whether or not it exists.
pub fn discover_config(cwd: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_CONFIG);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("pathreg").join("config.yml");
    if user.is_file() {
        Some(user)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PathregConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PathregError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathregError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`PathregConfig`].
///
/// An empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PathregConfig> {
    if content.trim().is_empty() {
        return Ok(PathregConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PathregError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Discover and load the config, then apply environment overrides.
///
/// Without an explicit path and with nothing discovered, the defaults are
/// used.
pub fn load_config(cwd: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let source = discover_config(cwd, explicit);
    let mut config = match &source {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            PathregConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(LoadedConfig { config, source })
}

/// Apply `PATHREG_PROFILE`, `PATHREG_MACHINE_PROFILE` and `PATHREG_BASE_PATH`
/// from `lookup`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut PathregConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(profile) = non_empty(PROFILE_ENV) {
        config.settings.profile = Some(PathBuf::from(profile));
    }
    if let Some(profile) = non_empty(MACHINE_PROFILE_ENV) {
        config.settings.machine_profile = Some(PathBuf::from(profile));
    }
    if let Some(base) = non_empty(BASE_PATH_ENV) {
        config.settings.base_path = Some(base);
    }
}

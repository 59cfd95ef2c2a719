//! Configuration schema definitions for pathreg.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::pathvar::PersistenceScope;
use crate::probe::DEFAULT_VERSION_ARG;
use crate::registrar::Registration;

/// Root configuration structure for `.pathreg.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathregConfig {
    /// Global settings
    pub settings: Settings,

    /// Named registrations, applied in name order
    #[serde(default)]
    pub registrations: BTreeMap<String, RegistrationConfig>,
}

impl PathregConfig {
    /// All registrations, with settings defaults filled in.
    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations
            .iter()
            .map(|(name, reg)| reg.resolve(name, &self.settings))
            .collect()
    }
}

/// Settings shared by every registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scope used when a registration doesn't name one
    pub scope: PersistenceScope,

    /// Version argument used when a registration doesn't name one
    #[serde(default = "default_version_arg")]
    pub version_arg: String,

    /// Verify before writing instead of after
    #[serde(default, skip_serializing_if = "is_false")]
    pub verify_first: bool,

    /// Seconds before a version probe is killed
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: u64,

    /// User-scope profile file (POSIX)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<PathBuf>,

    /// Machine-scope profile file (POSIX)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_profile: Option<PathBuf>,

    /// PATH a fresh login shell starts with, before the managed block (POSIX).
    /// Queried from a clean login shell when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scope: PersistenceScope::default(),
            version_arg: default_version_arg(),
            verify_first: false,
            probe_timeout: default_probe_timeout(),
            profile: None,
            machine_profile: None,
            base_path: None,
        }
    }
}

impl Settings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout)
    }
}

fn default_version_arg() -> String {
    DEFAULT_VERSION_ARG.to_string()
}

fn default_probe_timeout() -> u64 {
    10
}

fn is_false(v: &bool) -> bool {
    !v
}

/// One `registrations:` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Absolute path of the executable
    pub exe: PathBuf,

    /// Directory to register (defaults to the executable's parent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<PersistenceScope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_arg: Option<String>,
}

impl RegistrationConfig {
    /// Build a [`Registration`], falling back to `settings` for unset fields.
    pub fn resolve(&self, name: &str, settings: &Settings) -> Registration {
        let mut registration = Registration::new(name, self.exe.clone())
            .with_scope(self.scope.unwrap_or(settings.scope))
            .with_version_arg(
                self.version_arg
                    .clone()
                    .unwrap_or_else(|| settings.version_arg.clone()),
            );
        if let Some(dir) = &self.dir {
            registration = registration.with_dir(dir.clone());
        }
        registration
    }
}

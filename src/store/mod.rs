//! Persistent storage for the PATH variable.
//!
//! All reads and writes go through the [`PathStore`] trait so the
//! registration logic can run against [`MemoryStore`] in tests and a
//! platform-backed store in the binary.
//!
//! - [`memory`] - In-memory store with access counters
//! - [`profile`] - POSIX shell profile files with a managed block
//! - [`registry`] - Windows registry through `reg.exe`

pub mod memory;
pub mod profile;
pub mod registry;

pub use memory::MemoryStore;
pub use profile::ProfileStore;
pub use registry::RegistryStore;

use crate::config::Settings;
use crate::error::Result;
use crate::pathvar::{PathSyntax, PersistenceScope};

/// Get/set access to a scoped, persistent PATH value.
pub trait PathStore {
    /// Separator and comparison rules for values in this store.
    fn syntax(&self) -> PathSyntax;

    /// Read the current value for `scope`. A missing value reads as empty.
    fn get(&self, scope: PersistenceScope) -> Result<String>;

    /// Replace the value for `scope`.
    fn set(&mut self, scope: PersistenceScope, value: &str) -> Result<()>;

    /// Human-readable location of `scope` (for status output).
    fn location(&self, scope: PersistenceScope) -> String;
}

/// The store for the platform this binary runs on.
pub fn default_store(settings: &Settings) -> Result<Box<dyn PathStore>> {
    if cfg!(windows) {
        Ok(Box::new(RegistryStore::new()))
    } else {
        Ok(Box::new(ProfileStore::from_settings(settings)?))
    }
}

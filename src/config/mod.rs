//! Configuration loading, parsing, and validation for pathreg.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use pathreg::config::{load_config, validate};
//! use pathreg::pathvar::PathSyntax;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(".pathreg.yml"),
//!     "registrations:\n  tool:\n    exe: /opt/tool/bin/tool\n",
//! )
//! .unwrap();
//!
//! let loaded = load_config(temp.path(), None).unwrap();
//! validate(&loaded.config, PathSyntax::Posix).unwrap();
//! assert_eq!(loaded.config.registrations().len(), 1);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{PathregConfig, RegistrationConfig, Settings};

// Loader re-exports
pub use loader::{
    apply_env_overrides, discover_config, load_config, load_config_file, parse_config,
    LoadedConfig, BASE_PATH_ENV, MACHINE_PROFILE_ENV, PROFILE_ENV, PROJECT_CONFIG,
};

// Validator re-exports
pub use validator::{validate, validate_config, validate_settings, ValidationError};

//! Error types for pathreg operations.
//!
//! This module defines [`PathregError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PathregError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PathregError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

use crate::pathvar::PersistenceScope;

/// Core error type for pathreg operations.
#[derive(Debug, Error)]
pub enum PathregError {
    /// The executable that gates a registration does not exist.
    #[error("Dependency not found: {path}")]
    DependencyNotFound { path: PathBuf },

    /// Reading the persistent PATH value failed.
    #[error("Failed to read {scope} PATH: {message}")]
    StoreReadFailed {
        scope: PersistenceScope,
        message: String,
    },

    /// The platform rejected a write to the persistent PATH value.
    #[error("Failed to write {scope} PATH: {message}")]
    StoreWriteFailed {
        scope: PersistenceScope,
        message: String,
    },

    /// Running the executable's version query failed.
    #[error("Verification of {exe} failed: {message}")]
    VerificationFailed { exe: PathBuf, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A registration name was requested that the config doesn't define.
    #[error("Unknown registration: {name}")]
    UnknownRegistration { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pathreg operations.
pub type Result<T> = std::result::Result<T, PathregError>;

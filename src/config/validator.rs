//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Executables must be absolute paths
//! - Registered directories must be absolute and hold a single PATH segment
//! - The probe timeout must be positive

use crate::config::schema::{PathregConfig, Settings};
use crate::error::{PathregError, Result};
use crate::pathvar::PathSyntax;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Registration name if error is registration-specific
    pub registration: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// Paths are checked against `syntax`, the rules of the store the
/// registrations will be written to.
pub fn validate_config(config: &PathregConfig, syntax: PathSyntax) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(settings_errors(&config.settings));
    errors.extend(validate_registrations(config, syntax));

    errors
}

fn settings_errors(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if settings.probe_timeout == 0 {
        errors.push(ValidationError {
            rule: "probe-timeout".to_string(),
            message: "settings.probe_timeout must be at least 1 second".to_string(),
            registration: None,
        });
    }
    if settings.version_arg.trim().is_empty() {
        errors.push(ValidationError {
            rule: "empty-version-arg".to_string(),
            message: "settings.version_arg must not be empty".to_string(),
            registration: None,
        });
    }

    errors
}

fn validate_registrations(config: &PathregConfig, syntax: PathSyntax) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, entry) in &config.registrations {
        let exe = entry.exe.to_string_lossy();
        if !syntax.is_absolute(&exe) {
            errors.push(ValidationError {
                rule: "relative-exe".to_string(),
                message: format!(
                    "Registration '{}': exe '{}' must be an absolute path",
                    name, exe
                ),
                registration: Some(name.clone()),
            });
            continue;
        }

        // Also covers an explicit `dir:`.
        if let Err(err) = entry.resolve(name, &config.settings).target_dir(syntax) {
            errors.push(ValidationError {
                rule: "invalid-dir".to_string(),
                message: match err {
                    PathregError::ConfigValidationError { message } => message,
                    other => other.to_string(),
                },
                registration: Some(name.clone()),
            });
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PathregConfig, syntax: PathSyntax) -> Result<()> {
    into_result(validate_config(config, syntax))
}

/// Validate only the `settings:` section.
///
/// Used when registrations come from the command line instead of the file.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    into_result(settings_errors(settings))
}

fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PathregError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

//! Shared display helpers for registration reports.
//!
//! `ensure` and `apply` render a [`Report`] the same way: one status line
//! (the finished spinner), optional details in verbose mode, then hints.

use serde::Serialize;

use crate::error::{PathregError, Result};
use crate::registrar::{Outcome, Report, Verification};
use crate::ui::{SpinnerHandle, UserInterface};

/// Severity of a report's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Success,
    Warning,
    Error,
    Skipped,
}

/// The status line for a finished registration.
pub fn outcome_line(report: &Report) -> (LineKind, String) {
    let dir = &report.dir;
    let scope = report.scope;

    match report.outcome {
        Outcome::Added => with_verification(
            report,
            format!("Added {} to the {} PATH", dir, scope),
            LineKind::Success,
        ),
        Outcome::AlreadyPresent => with_verification(
            report,
            format!("{} is already on the {} PATH", dir, scope),
            LineKind::Success,
        ),
        Outcome::WouldAdd => {
            let (_, line) = with_verification(
                report,
                format!("Would add {} to the {} PATH", dir, scope),
                LineKind::Skipped,
            );
            (LineKind::Skipped, line)
        }
        Outcome::NotFound => (
            LineKind::Error,
            format!(
                "{} not found; the {} PATH was not changed",
                report.exe.display(),
                scope
            ),
        ),
        Outcome::WriteFailed => (
            LineKind::Error,
            format!(
                "Could not add {}: {}",
                dir,
                report.error.as_deref().unwrap_or("write rejected")
            ),
        ),
        Outcome::VerificationFailed => {
            let reason = match &report.verification {
                Verification::Failed { reason } => reason.as_str(),
                _ => "unknown error",
            };
            (
                LineKind::Error,
                format!(
                    "{} failed its version check ({}); the {} PATH was not changed",
                    report.name, reason, scope
                ),
            )
        }
    }
}

fn with_verification(report: &Report, base: String, ok: LineKind) -> (LineKind, String) {
    match &report.verification {
        Verification::Passed {
            version: Some(version),
            ..
        } => (ok, format!("{} ({} {})", base, report.name, version)),
        Verification::Failed { reason } => (
            LineKind::Warning,
            format!("{}, but the version check failed: {}", base, reason),
        ),
        _ => (ok, base),
    }
}

/// Finish `spinner` with the report's status line.
pub fn finish_spinner(spinner: &mut dyn SpinnerHandle, report: &Report) {
    let (kind, line) = outcome_line(report);
    match kind {
        LineKind::Success => spinner.finish_success(&line),
        LineKind::Warning => spinner.finish_warning(&line),
        LineKind::Error => spinner.finish_error(&line),
        LineKind::Skipped => spinner.finish_skipped(&line),
    }
}

/// Show the values read and written (verbose mode only).
pub fn show_details(ui: &mut dyn UserInterface, report: &Report) {
    if !ui.output_mode().shows_details() {
        return;
    }

    ui.message(&format!("  location: {}", report.location));
    if let Some(previous) = &report.previous {
        ui.message(&format!("  before:   {}", previous));
    }
    if let Some(updated) = &report.updated {
        ui.message(&format!("  after:    {}", updated));
    }
    if let Verification::Passed {
        summary: Some(summary),
        ..
    } = &report.verification
    {
        ui.message(&format!("  version:  {}", summary));
    }
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PathregError::Other(e.into()))
}

//! Results of a registration attempt.

use std::path::PathBuf;

use serde::Serialize;

use crate::pathvar::PersistenceScope;

use super::Registration;

/// Where a registration ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The executable doesn't exist; nothing was read or written.
    NotFound,
    /// The directory was already on PATH; nothing was written.
    AlreadyPresent,
    /// The directory was appended and written back.
    Added,
    /// Dry run: the directory would have been appended.
    WouldAdd,
    /// The store rejected the write; the value is unchanged.
    WriteFailed,
    /// Verify-first mode: the version query failed, so nothing was written.
    VerificationFailed,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AlreadyPresent | Self::Added | Self::WouldAdd => 0,
            Self::NotFound => 2,
            Self::WriteFailed => 3,
            Self::VerificationFailed => 4,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Result of asking the executable for its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    /// The probe didn't run.
    Skipped,
    Passed {
        version: Option<String>,
        summary: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl Verification {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Everything known about one registration attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    pub scope: PersistenceScope,
    pub exe: PathBuf,
    /// The directory that was checked (and possibly appended).
    pub dir: String,
    /// Where the scope's value lives (registry key, profile file).
    pub location: String,
    pub outcome: Outcome,
    pub verification: Verification,
    /// Value as read from the store; `None` if the store wasn't read.
    pub previous: Option<String>,
    /// Value written (or, in a dry run, that would be written).
    pub updated: Option<String>,
    /// Error behind a failure outcome.
    pub error: Option<String>,
}

impl Report {
    pub(crate) fn new(registration: &Registration, dir: String, location: String) -> Self {
        Self {
            name: registration.name.clone(),
            scope: registration.scope,
            exe: registration.exe.clone(),
            dir,
            location,
            outcome: Outcome::NotFound,
            verification: Verification::Skipped,
            previous: None,
            updated: None,
            error: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

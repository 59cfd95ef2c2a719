//! Canned version probe for tests.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pathreg::probe::{FakeProbe, ProbeOutput, VersionProbe};
//!
//! let probe = FakeProbe::returning(ProbeOutput::ok("git version 2.43.0"));
//! let out = probe.run(Path::new("/usr/bin/git"), "--version").unwrap();
//!
//! assert_eq!(out.version().as_deref(), Some("2.43.0"));
//! assert_eq!(probe.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{PathregError, Result};

use super::{ProbeOutput, VersionProbe};

/// A [`VersionProbe`] that never spawns anything.
#[derive(Debug, Default)]
pub struct FakeProbe {
    output: Option<ProbeOutput>,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FakeProbe {
    /// Every run returns `output`.
    pub fn returning(output: ProbeOutput) -> Self {
        Self {
            output: Some(output),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every run fails to start the executable.
    pub fn unlaunchable() -> Self {
        Self::default()
    }

    /// `(exe, arg)` for every run so far.
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.borrow().clone()
    }
}

impl VersionProbe for FakeProbe {
    fn run(&self, exe: &Path, arg: &str) -> Result<ProbeOutput> {
        self.calls
            .borrow_mut()
            .push((exe.to_path_buf(), arg.to_string()));

        self.output
            .clone()
            .ok_or_else(|| PathregError::VerificationFailed {
                exe: exe.to_path_buf(),
                message: "No such file or directory (os error 2)".to_string(),
            })
    }
}

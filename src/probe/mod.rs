//! Post-registration verification by running the tool itself.
//!
//! After the PATH change the tool is asked for its version. This is only a
//! confirmation signal: a failing probe is reported but never undoes a write.
//!
//! - [`command`] - Runs the real executable
//! - [`fake`] - Canned results for tests

pub mod command;
pub mod fake;

pub use command::CommandProbe;
pub use fake::FakeProbe;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// Default argument asking a tool for its version.
pub const DEFAULT_VERSION_ARG: &str = "--version";

/// First dotted version number in a line of output.
static VERSION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)+(?:[-+][0-9A-Za-z.\-]+)?").expect("VERSION_NUMBER must compile")
});

/// Runs an executable with a version-query argument.
pub trait VersionProbe {
    /// Run `exe arg`.
    ///
    /// Returns `Err` only when the executable can't be started.
    fn run(&self, exe: &Path, arg: &str) -> Result<ProbeOutput>;
}

/// What a version query printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ProbeOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    /// A run that exited with `code`.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }

    /// First non-empty output line, preferring stdout.
    ///
    /// Some tools (`java -version`) print their version on stderr.
    pub fn summary(&self) -> Option<&str> {
        first_line(&self.stdout).or_else(|| first_line(&self.stderr))
    }

    /// The version number from the summary line, if it has one.
    pub fn version(&self) -> Option<String> {
        let line = self.summary()?;
        VERSION_NUMBER.find(line).map(|m| m.as_str().to_string())
    }

    /// Why the run counts as a failure, or `None` if it succeeded.
    pub fn failure_reason(&self) -> Option<String> {
        if self.timed_out {
            return Some("timed out".to_string());
        }
        match self.exit_code {
            Some(0) => None,
            Some(code) => {
                let detail = first_line(&self.stderr)
                    .map(|l| format!(": {}", l))
                    .unwrap_or_default();
                Some(format!("exited with code {}{}", code, detail))
            }
            None => Some("terminated by signal".to_string()),
        }
    }
}

fn first_line(s: &str) -> Option<&str> {
    s.lines().map(str::trim).find(|l| !l.is_empty())
}

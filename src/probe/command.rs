//! Version probe that spawns the real executable.

use std::path::Path;
use std::time::Duration;

use crate::error::{PathregError, Result};
use crate::shell::{execute, CommandOptions};

use super::{ProbeOutput, VersionProbe};

/// Default probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the executable directly, without a shell.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl VersionProbe for CommandProbe {
    fn run(&self, exe: &Path, arg: &str) -> Result<ProbeOutput> {
        tracing::debug!("Probing {} {}", exe.display(), arg);

        let options = CommandOptions {
            timeout: Some(self.timeout),
        };

        let result = execute(exe, &[arg], &options).map_err(|e| {
            PathregError::VerificationFailed {
                exe: exe.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(
            "Probe finished in {:?} with exit code {:?}",
            result.duration,
            result.exit_code
        );

        Ok(ProbeOutput {
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
            timed_out: result.timed_out,
        })
    }
}

//! External program execution.
//!
//! Programs are spawned directly (no intermediate shell) with captured
//! stdout/stderr and an optional timeout.

use crate::error::Result;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a child with a timeout is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timeout).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program exited with code 0.
    pub success: bool,

    /// Whether the program was killed after exceeding the timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a child that was killed at the timeout.
    pub fn timed_out(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            timed_out: true,
            ..Self::failure(None, stdout, stderr, duration)
        }
    }
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Kill the child after this long (None = wait forever).
    pub timeout: Option<Duration>,
}

/// Execute `program` with `args`, capturing its output.
///
/// Returns `Err` only when the program can't be spawned or waited on; a
/// non-zero exit or a timeout is reported through [`CommandResult`].
pub fn execute<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program.as_ref());
    cmd.args(args);

    // A timed child leads its own process group, so anything it spawns
    // (wrapper scripts exec'ing the real tool) is killed with it.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        if options.timeout.is_some() {
            cmd.process_group(0);
        }
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn()?;

    // Drain both pipes on their own threads so a chatty child can't block on
    // a full pipe while we wait for it.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_handle = thread::spawn(move || read_pipe(stdout_pipe));
    let stderr_handle = thread::spawn(move || read_pipe(stderr_pipe));

    let status = match options.timeout {
        Some(limit) => loop {
            if let Some(status) = child.try_wait()? {
                break Some(status);
            }
            if start.elapsed() >= limit {
                kill_tree(&mut child);
                let _ = child.wait();
                break None;
            }
            thread::sleep(POLL_INTERVAL);
        },
        None => Some(child.wait()?),
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    Ok(match status {
        Some(status) if status.success() => CommandResult::success(stdout, stderr, duration),
        Some(status) => CommandResult::failure(status.code(), stdout, stderr, duration),
        None => CommandResult::timed_out(stdout, stderr, duration),
    })
}

/// Execute a program and return success/failure.
pub fn execute_check<S: AsRef<OsStr>>(program: impl AsRef<OsStr>, args: &[S]) -> bool {
    execute(program, args, &CommandOptions::default())
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Kill a timed-out child and, on unix, every process in its group.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: killpg only sends a signal; the group was created for
            // this child by `process_group(0)`.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

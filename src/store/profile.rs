//! PATH persistence through POSIX shell profile files.
//!
//! POSIX systems have no registry for environment variables; a login shell
//! builds `PATH` by sourcing profile files. This store models the persistent
//! value as the `PATH` a fresh login shell starts with (the base) plus the
//! directories listed in a block that pathreg owns inside a profile file:
//!
//! ```text
//! # >>> pathreg >>>
//! # Managed by pathreg; changes inside this block are overwritten.
//! export PATH="$PATH:/opt/tool/bin"
//! # <<< pathreg <<<
//! ```
//!
//! Everything outside the block is left untouched.
//!
//! The base never comes from the invoking process: a directory that is only
//! on the current shell's temporary `PATH` is not persistent.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Settings;
use crate::error::{PathregError, Result};
use crate::pathvar::{PathList, PathSyntax, PersistenceScope};
use crate::shell::{execute, expand_home, CommandOptions};

use super::PathStore;

const BEGIN_MARKER: &str = "# >>> pathreg >>>";
const END_MARKER: &str = "# <<< pathreg <<<";
const NOTICE: &str = "# Managed by pathreg; changes inside this block are overwritten.";
const EXPORT_PREFIX: &str = "export PATH=\"$PATH:";

/// Default user-scope profile.
pub const DEFAULT_USER_PROFILE: &str = "~/.profile";

/// Default machine-scope profile.
pub const DEFAULT_MACHINE_PROFILE: &str = "/etc/profile.d/pathreg.sh";

/// Base used when no login shell can be queried.
pub const DEFAULT_BASE_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Prints the login `PATH` on its own last line, after anything the
/// profiles themselves print.
const LOGIN_PATH_SCRIPT: &str = r#"printf '\n%s' "$PATH""#;

const LOGIN_SHELL_TIMEOUT: Duration = Duration::from_secs(5);

/// A [`PathStore`] backed by shell profile files.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    base: String,
    user_profile: PathBuf,
    machine_profile: PathBuf,
}

impl ProfileStore {
    /// Create a store with an explicit base `PATH` and profile files.
    pub fn new(
        base: impl Into<String>,
        user_profile: impl Into<PathBuf>,
        machine_profile: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base: base.into(),
            user_profile: user_profile.into(),
            machine_profile: machine_profile.into(),
        }
    }

    /// Create a store from the configured base and profile paths.
    ///
    /// Without `settings.base_path` the base is queried from a clean login
    /// shell, falling back to [`DEFAULT_BASE_PATH`].
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let user = resolve_profile(settings.profile.as_deref(), DEFAULT_USER_PROFILE)?;
        let machine =
            resolve_profile(settings.machine_profile.as_deref(), DEFAULT_MACHINE_PROFILE)?;
        let base = match &settings.base_path {
            Some(base) => base.clone(),
            None => login_path().unwrap_or_else(|| {
                tracing::debug!("Login shell PATH unavailable, using {}", DEFAULT_BASE_PATH);
                DEFAULT_BASE_PATH.to_string()
            }),
        };

        Ok(Self::new(base, user, machine))
    }

    /// The base value the managed entries are appended to.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The profile file that holds `scope`.
    pub fn profile_path(&self, scope: PersistenceScope) -> &Path {
        match scope {
            PersistenceScope::Machine => &self.machine_profile,
            PersistenceScope::User => &self.user_profile,
        }
    }

    fn read_profile(&self, scope: PersistenceScope) -> std::io::Result<String> {
        match fs::read_to_string(self.profile_path(scope)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

/// `PATH` of a login shell started with an empty environment.
fn login_path() -> Option<String> {
    if !cfg!(unix) {
        return None;
    }

    let home = dirs::home_dir()?;
    let home_var = format!("HOME={}", home.display());
    let options = CommandOptions {
        timeout: Some(LOGIN_SHELL_TIMEOUT),
    };
    let result = execute(
        "env",
        &["-i", home_var.as_str(), "/bin/sh", "-lc", LOGIN_PATH_SCRIPT],
        &options,
    )
    .ok()?;

    if !result.success {
        tracing::debug!("Login shell exited with {:?}", result.exit_code);
        return None;
    }
    parse_login_output(&result.stdout)
}

fn parse_login_output(stdout: &str) -> Option<String> {
    let path = stdout.rsplit('\n').next()?.trim();
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

fn resolve_profile(configured: Option<&Path>, default: &str) -> Result<PathBuf> {
    let raw = configured.unwrap_or_else(|| Path::new(default));
    let path = expand_home(raw);
    if path.starts_with("~") {
        return Err(PathregError::ConfigValidationError {
            message: format!(
                "Cannot resolve profile path {}: no home directory",
                raw.display()
            ),
        });
    }
    Ok(path)
}

impl PathStore for ProfileStore {
    fn syntax(&self) -> PathSyntax {
        PathSyntax::Posix
    }

    fn get(&self, scope: PersistenceScope) -> Result<String> {
        let content = self
            .read_profile(scope)
            .map_err(|e| PathregError::StoreReadFailed {
                scope,
                message: format!("{}: {}", self.profile_path(scope).display(), e),
            })?;

        let block = ManagedBlock::parse(&content);
        let mut list = PathList::new(self.base.clone(), PathSyntax::Posix);
        for dir in &block.dirs {
            if !list.contains(dir) {
                list = list.appended(dir);
            }
        }

        tracing::debug!(
            "Read {} PATH from {} ({} managed entries)",
            scope,
            self.profile_path(scope).display(),
            block.dirs.len()
        );
        Ok(list.into_raw())
    }

    fn set(&mut self, scope: PersistenceScope, value: &str) -> Result<()> {
        let path = self.profile_path(scope).to_path_buf();
        let write_failed = |e: std::io::Error| PathregError::StoreWriteFailed {
            scope,
            message: format!("{}: {}", path.display(), e),
        };

        let content = self.read_profile(scope).map_err(write_failed)?;
        let mut block = ManagedBlock::parse(&content);

        let wanted = PathList::new(value, PathSyntax::Posix);
        let base = PathList::new(self.base.as_str(), PathSyntax::Posix);

        // Keep previously managed entries that are still wanted, even when
        // the base already has them (a login shell sources this block).
        let mut dirs: Vec<String> = block
            .dirs
            .iter()
            .filter(|d| wanted.contains(d))
            .cloned()
            .collect();
        for segment in wanted.segments() {
            let already = dirs
                .iter()
                .any(|d| PathSyntax::Posix.same_dir(d, segment));
            if !already && !base.contains(segment) {
                dirs.push(segment.to_string());
            }
        }
        block.dirs = dirs;

        fs::write(&path, block.render()).map_err(write_failed)?;
        tracing::debug!("Wrote {} managed entries to {}", block.dirs.len(), path.display());
        Ok(())
    }

    fn location(&self, scope: PersistenceScope) -> String {
        self.profile_path(scope).display().to_string()
    }
}

/// A profile file split around the pathreg block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ManagedBlock {
    before: String,
    dirs: Vec<String>,
    after: String,
}

impl ManagedBlock {
    fn parse(content: &str) -> Self {
        let Some(begin) = content.find(BEGIN_MARKER) else {
            return Self {
                before: content.to_string(),
                dirs: Vec::new(),
                after: String::new(),
            };
        };

        let body_start = begin + BEGIN_MARKER.len();
        let (body, after) = match content[body_start..].find(END_MARKER) {
            Some(end) => {
                let end = body_start + end;
                let rest = &content[end + END_MARKER.len()..];
                (&content[body_start..end], rest.strip_prefix('\n').unwrap_or(rest))
            }
            // Unterminated block: treat the rest of the file as ours.
            None => (&content[body_start..], ""),
        };

        let dirs = body
            .lines()
            .filter_map(|line| {
                line.trim()
                    .strip_prefix(EXPORT_PREFIX)
                    .and_then(|rest| rest.strip_suffix('"'))
            })
            .flat_map(|list| {
                unescape(list)
                    .split(':')
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            before: content[..begin].to_string(),
            dirs,
            after: after.to_string(),
        }
    }

    fn render(&self) -> String {
        let mut out = self.before.clone();

        if !self.dirs.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            let escaped: Vec<String> = self.dirs.iter().map(|d| escape(d)).collect();
            out.push_str(BEGIN_MARKER);
            out.push('\n');
            out.push_str(NOTICE);
            out.push('\n');
            out.push_str(EXPORT_PREFIX);
            out.push_str(&escaped.join(":"));
            out.push_str("\"\n");
            out.push_str(END_MARKER);
            out.push('\n');
        }

        out.push_str(&self.after);
        out
    }
}

/// Escape for a double-quoted shell string.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

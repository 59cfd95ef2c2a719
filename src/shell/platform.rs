//! Platform detection helpers.

use std::path::{Path, PathBuf};

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        // `net session` only succeeds from an elevated token.
        super::command::execute_check("net", &["session"])
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

/// Expand a leading `~/` (or a bare `~`) to the home directory.
///
/// Paths without the prefix, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    let rest = if s == "~" {
        Some("")
    } else {
        s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }

    #[test]
    fn is_elevated_does_not_panic() {
        let _ = is_elevated();
    }

    #[test]
    fn expand_home_leaves_absolute_paths_alone() {
        assert_eq!(
            expand_home(Path::new("/etc/profile.d/pathreg.sh")),
            PathBuf::from("/etc/profile.d/pathreg.sh")
        );
    }

    #[test]
    fn expand_home_replaces_tilde_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/.profile")), home.join(".profile"));
            assert_eq!(expand_home(Path::new("~")), home);
        }
    }

    #[test]
    fn expand_home_ignores_tilde_user_form() {
        assert_eq!(
            expand_home(Path::new("~alice/.profile")),
            PathBuf::from("~alice/.profile")
        );
    }
}

//! End-to-end tests for the pathreg binary.
//!
//! Every test runs in its own temp directory with `HOME`, the config
//! directory and both profile files redirected there, so nothing outside
//! the sandbox is read or written.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LOGIN_PATH: &str = "/usr/bin:/bin";

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        Self { temp }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn project(&self) -> PathBuf {
        self.root().join("project")
    }

    fn user_profile(&self) -> PathBuf {
        self.root().join("home").join(".profile")
    }

    fn machine_profile(&self) -> PathBuf {
        self.root().join("machine.sh")
    }

    /// Install a script at `<root>/<dir>/<name>` that prints `output` and
    /// exits with `code`.
    fn tool(&self, dir: &str, name: &str, output: &str, code: i32) -> PathBuf {
        let bin = self.root().join(dir);
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join(name);
        fs::write(
            &exe,
            format!("#!/bin/sh\necho '{}'\nexit {}\n", output, code),
        )
        .unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        exe
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("pathreg"));
        cmd.current_dir(self.project())
            .env("HOME", self.root().join("home"))
            .env("XDG_CONFIG_HOME", self.root().join("home").join(".config"))
            .env("PATHREG_PROFILE", self.user_profile())
            .env("PATHREG_MACHINE_PROFILE", self.machine_profile())
            .env("PATHREG_BASE_PATH", LOGIN_PATH)
            .env("PATH", LOGIN_PATH)
            .env("CI", "true")
            .env_remove("PATHREG_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn dir_of(exe: &Path) -> String {
    exe.parent().unwrap().display().to_string()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("ensure"))
        .stdout(predicate::str::contains("apply"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pathreg"));
    Ok(())
}

#[test]
fn ensure_adds_then_reports_already_present() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    let dir = dir_of(&exe);

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Added {} to the user PATH",
            dir
        )))
        .stdout(predicate::str::contains("mytool 1.2.3"));

    let profile = fs::read_to_string(sandbox.user_profile())?;
    assert!(profile.contains("# >>> pathreg >>>"));
    assert!(profile.contains(&dir));

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{} is already on the user PATH",
            dir
        )));

    assert_eq!(fs::read_to_string(sandbox.user_profile())?, profile);
    Ok(())
}

#[test]
fn ensure_ignores_directory_only_on_current_path() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    let dir = dir_of(&exe);

    sandbox
        .cmd()
        .env("PATH", format!("{}:{}", LOGIN_PATH, dir))
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Added {} to the user PATH",
            dir
        )));

    assert!(fs::read_to_string(sandbox.user_profile())?.contains(&dir));
    Ok(())
}

#[test]
fn ensure_rejects_zero_probe_timeout() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    fs::write(
        sandbox.project().join(".pathreg.yml"),
        "settings:\n  probe_timeout: 0\n",
    )?;

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("probe_timeout"));

    assert!(!sandbox.user_profile().exists());
    Ok(())
}

#[test]
fn ensure_invalid_dir_is_reported_once() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);

    let output = sandbox
        .cmd()
        .args(["ensure", "--dir", "relative/bin", "--exe"])
        .arg(&exe)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr.matches("not absolute").count(), 1, "{}", stderr);
    Ok(())
}

#[test]
fn ensure_bare_missing_name_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ensure", "--exe", "pathreg-no-such-tool"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn ensure_keeps_existing_profile_content() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    fs::write(sandbox.user_profile(), "alias ll='ls -l'\n")?;
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);

    sandbox.cmd().args(["ensure", "--exe"]).arg(&exe).assert().success();

    let profile = fs::read_to_string(sandbox.user_profile())?;
    assert!(profile.starts_with("alias ll='ls -l'\n"));
    assert!(profile.contains(&dir_of(&exe)));
    Ok(())
}

#[test]
fn ensure_missing_executable_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.root().join("nowhere").join("mytool");

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));

    assert!(!sandbox.user_profile().exists());
    Ok(())
}

#[test]
fn ensure_rejected_write_exits_3() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    let unwritable = sandbox.root().join("missing").join(".profile");

    sandbox
        .cmd()
        .env("PATHREG_PROFILE", &unwritable)
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not add"));

    assert!(!unwritable.exists());
    Ok(())
}

#[test]
fn ensure_failed_version_check_still_registers() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "broken", "broken: missing runtime", 1);

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains("version check failed"));

    let profile = fs::read_to_string(sandbox.user_profile())?;
    assert!(profile.contains(&dir_of(&exe)));
    Ok(())
}

#[test]
fn ensure_verify_first_skips_write_on_failure() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "broken", "broken: missing runtime", 1);

    sandbox
        .cmd()
        .args(["ensure", "--verify-first"])
        .arg("--exe")
        .arg(&exe)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed its version check"));

    assert!(!sandbox.user_profile().exists());
    Ok(())
}

#[test]
fn ensure_dry_run_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);

    sandbox
        .cmd()
        .args(["ensure", "--dry-run"])
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would add"));

    assert!(!sandbox.user_profile().exists());
    Ok(())
}

#[test]
fn ensure_machine_scope_writes_machine_profile() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);

    sandbox
        .cmd()
        .args(["ensure", "--scope", "machine"])
        .arg("--exe")
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains("machine PATH"));

    assert!(fs::read_to_string(sandbox.machine_profile())?.contains(&dir_of(&exe)));
    assert!(!sandbox.user_profile().exists());
    Ok(())
}

#[test]
fn ensure_json_reports_outcome() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);

    let output = sandbox
        .cmd()
        .args(["ensure", "--json"])
        .arg("--exe")
        .arg(&exe)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["outcome"], "added");
    assert_eq!(report["scope"], "user");
    assert_eq!(report["dir"], dir_of(&exe));
    assert_eq!(report["verification"]["status"], "passed");
    assert_eq!(report["verification"]["version"], "1.2.3");
    Ok(())
}

#[test]
fn ensure_explicit_dir_and_version_arg() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/libexec", "mytool", "mytool 2.0.0", 0);
    let dir = sandbox.root().join("tools").join("shims");

    sandbox
        .cmd()
        .arg("ensure")
        .arg("--exe")
        .arg(&exe)
        .arg("--dir")
        .arg(&dir)
        .arg("--version-arg=-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Added {} to the user PATH",
            dir.display()
        )));
    Ok(())
}

#[test]
fn apply_registers_configured_tools() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let alpha = sandbox.tool("alpha/bin", "alpha", "alpha 1.0.0", 0);
    let beta = sandbox.tool("beta/bin", "beta", "beta 3.1.4", 0);
    fs::write(
        sandbox.project().join(".pathreg.yml"),
        format!(
            "registrations:\n  alpha:\n    exe: {}\n  beta:\n    exe: {}\n",
            alpha.display(),
            beta.display()
        ),
    )?;

    sandbox
        .cmd()
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changed, 0 unchanged, 0 failed"));

    let profile = fs::read_to_string(sandbox.user_profile())?;
    assert!(profile.contains(&dir_of(&alpha)));
    assert!(profile.contains(&dir_of(&beta)));

    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("0 changed, 2 unchanged, 0 failed"));
    Ok(())
}

#[test]
fn apply_selected_name_with_explicit_config() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let alpha = sandbox.tool("alpha/bin", "alpha", "alpha 1.0.0", 0);
    let config = sandbox.root().join("tools.yml");
    fs::write(
        &config,
        format!(
            "registrations:\n  alpha:\n    exe: {}\n  ghost:\n    exe: {}\n",
            alpha.display(),
            sandbox.root().join("ghost").join("ghost").display()
        ),
    )?;

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["apply", "alpha"])
        .assert()
        .success();

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("apply")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("0 changed, 1 unchanged, 1 failed"));
    Ok(())
}

#[test]
fn apply_unknown_name_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let alpha = sandbox.tool("alpha/bin", "alpha", "alpha 1.0.0", 0);
    fs::write(
        sandbox.project().join(".pathreg.yml"),
        format!("registrations:\n  alpha:\n    exe: {}\n", alpha.display()),
    )?;

    sandbox
        .cmd()
        .args(["apply", "gamma"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown registration: gamma"));
    Ok(())
}

#[test]
fn apply_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("apply")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn apply_rejects_invalid_yaml() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.project().join(".pathreg.yml"),
        "registrations: [not, a, map\n",
    )?;

    sandbox
        .cmd()
        .arg("apply")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn check_reports_membership() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    let dir = dir_of(&exe);

    sandbox
        .cmd()
        .args(["check", "--dir", &dir])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not on the user PATH"));

    sandbox.cmd().args(["ensure", "--exe"]).arg(&exe).assert().success();

    sandbox
        .cmd()
        .args(["check", "--dir", &dir])
        .assert()
        .success()
        .stdout(predicate::str::contains("is on the user PATH"));

    sandbox
        .cmd()
        .args(["check", "--dir", "/usr/bin/"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn show_lists_inherited_and_managed_entries() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let exe = sandbox.tool("tools/bin", "mytool", "mytool 1.2.3", 0);
    sandbox.cmd().args(["ensure", "--exe"]).arg(&exe).assert().success();

    sandbox
        .cmd()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("user PATH"))
        .stdout(predicate::str::contains("/usr/bin"))
        .stdout(predicate::str::contains(dir_of(&exe)))
        .stdout(predicate::str::contains("3 entries"));
    Ok(())
}

#[test]
fn show_json_lists_entries() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["show", "--json"]).output()?;
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(listing["scope"], "user");
    assert_eq!(listing["entries"][0]["dir"], "/usr/bin");
    assert_eq!(listing["entries"][1]["dir"], "/bin");
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pathreg"));
    Ok(())
}

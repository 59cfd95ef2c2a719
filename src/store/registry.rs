//! PATH persistence in the Windows registry.
//!
//! Values are read and written with `reg.exe` so the store has no
//! platform-specific build dependencies. Running processes don't see the
//! change until they are restarted; new shells pick it up.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PathregError, Result};
use crate::pathvar::{PathSyntax, PersistenceScope};
use crate::shell::{execute, CommandOptions};

use super::PathStore;

/// Registry key holding the machine-wide environment.
pub const MACHINE_KEY: &str =
    r"HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Registry key holding the current user's environment.
pub const USER_KEY: &str = r"HKCU\Environment";

/// Name of the PATH value under either key.
pub const VALUE_NAME: &str = "Path";

/// Matches a value line of `reg query` output: `    Path    REG_EXPAND_SZ    C:\...`.
static VALUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+(\S+)\s+(REG_[A-Z_]+)(?:\s+(.*?))?\r?$").expect("VALUE_LINE must compile")
});

/// A [`PathStore`] backed by the Windows registry.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    reg_exe: String,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self {
            reg_exe: "reg".to_string(),
        }
    }

    /// The registry key for `scope`.
    pub fn key(scope: PersistenceScope) -> &'static str {
        match scope {
            PersistenceScope::Machine => MACHINE_KEY,
            PersistenceScope::User => USER_KEY,
        }
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a value's data from `reg query` output.
///
/// Value names are matched case-insensitively, as the registry does.
pub fn parse_query_output(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let caps = VALUE_LINE.captures(line)?;
        if caps[1].eq_ignore_ascii_case(name) {
            Some(caps.get(3).map_or("", |m| m.as_str()).to_string())
        } else {
            None
        }
    })
}

impl PathStore for RegistryStore {
    fn syntax(&self) -> PathSyntax {
        PathSyntax::Windows
    }

    fn get(&self, scope: PersistenceScope) -> Result<String> {
        let key = Self::key(scope);
        tracing::debug!("Querying {}\\{}", key, VALUE_NAME);

        let result = execute(
            &self.reg_exe,
            &["query", key, "/v", VALUE_NAME],
            &CommandOptions::default(),
        )
        .map_err(|e| PathregError::StoreReadFailed {
            scope,
            message: format!("could not run reg.exe: {}", e),
        })?;

        if result.success {
            return Ok(parse_query_output(&result.stdout, VALUE_NAME).unwrap_or_default());
        }

        // reg.exe exits 1 with "unable to find" when the value doesn't exist.
        if result.exit_code == Some(1) && result.stderr.to_lowercase().contains("unable to find") {
            return Ok(String::new());
        }

        Err(PathregError::StoreReadFailed {
            scope,
            message: failure_message(&result.stderr, result.exit_code),
        })
    }

    fn set(&mut self, scope: PersistenceScope, value: &str) -> Result<()> {
        let key = Self::key(scope);
        tracing::debug!("Writing {}\\{}", key, VALUE_NAME);

        let result = execute(
            &self.reg_exe,
            &[
                "add",
                key,
                "/v",
                VALUE_NAME,
                "/t",
                "REG_EXPAND_SZ",
                "/d",
                value,
                "/f",
            ],
            &CommandOptions::default(),
        )
        .map_err(|e| PathregError::StoreWriteFailed {
            scope,
            message: format!("could not run reg.exe: {}", e),
        })?;

        if result.success {
            Ok(())
        } else {
            Err(PathregError::StoreWriteFailed {
                scope,
                message: failure_message(&result.stderr, result.exit_code),
            })
        }
    }

    fn location(&self, scope: PersistenceScope) -> String {
        format!("{}\\{}", Self::key(scope), VALUE_NAME)
    }
}

fn failure_message(stderr: &str, code: Option<i32>) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("reg.exe exited with code {:?}", code)
    } else {
        stderr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY_OUTPUT: &str = "\r\nHKEY_CURRENT_USER\\Environment\r\n    Path    REG_EXPAND_SZ    %USERPROFILE%\\bin;C:\\Program Files\\Git\\cmd\r\n\r\n";

    #[test]
    fn parses_expand_sz_value() {
        assert_eq!(
            parse_query_output(QUERY_OUTPUT, "Path").as_deref(),
            Some(r"%USERPROFILE%\bin;C:\Program Files\Git\cmd")
        );
    }

    #[test]
    fn value_name_match_is_case_insensitive() {
        assert!(parse_query_output(QUERY_OUTPUT, "PATH").is_some());
    }

    #[test]
    fn other_values_are_ignored() {
        let output = "HKEY_CURRENT_USER\\Environment\n    TEMP    REG_EXPAND_SZ    C:\\Temp\n";
        assert_eq!(parse_query_output(output, "Path"), None);
    }

    #[test]
    fn empty_value_parses_as_empty() {
        let output = "HKEY_CURRENT_USER\\Environment\n    Path    REG_SZ    \n";
        assert_eq!(parse_query_output(output, "Path").as_deref(), Some(""));
    }

    #[test]
    fn value_without_data_parses_as_empty() {
        let output = "HKEY_CURRENT_USER\\Environment\n    Path    REG_SZ\n";
        assert_eq!(parse_query_output(output, "Path").as_deref(), Some(""));
    }

    #[test]
    fn keys_per_scope() {
        assert_eq!(RegistryStore::key(PersistenceScope::User), USER_KEY);
        assert!(RegistryStore::key(PersistenceScope::Machine).starts_with("HKLM"));
    }

    #[test]
    fn failure_message_prefers_stderr() {
        assert_eq!(
            failure_message("ERROR: Access is denied.\r\n", Some(1)),
            "ERROR: Access is denied."
        );
        assert!(failure_message("", Some(5)).contains("5"));
    }
}

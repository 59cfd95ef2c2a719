//! A single registration request.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{PathregError, Result};
use crate::pathvar::{PathSyntax, PersistenceScope};
use crate::probe::DEFAULT_VERSION_ARG;

/// "Put the directory of this executable on PATH."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Display name (config key, or the executable's file name).
    pub name: String,
    /// Absolute path of the executable that gates the registration.
    pub exe: PathBuf,
    /// Directory to register; defaults to the executable's parent.
    pub dir: Option<PathBuf>,
    pub scope: PersistenceScope,
    /// Argument that makes the executable print its version.
    pub version_arg: String,
}

impl Registration {
    /// Register the parent directory of `exe` in the user scope.
    pub fn new(name: impl Into<String>, exe: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            exe: exe.into(),
            dir: None,
            scope: PersistenceScope::default(),
            version_arg: DEFAULT_VERSION_ARG.to_string(),
        }
    }

    /// Name the registration after the executable's file name.
    pub fn for_exe(exe: impl Into<PathBuf>) -> Self {
        let exe = exe.into();
        let name = exe
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| exe.display().to_string());
        Self::new(name, exe)
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_scope(mut self, scope: PersistenceScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_version_arg(mut self, arg: impl Into<String>) -> Self {
        self.version_arg = arg.into();
        self
    }

    /// The directory to register, checked against `syntax`.
    ///
    /// Must be absolute and storable as one segment (no list separator).
    pub fn target_dir(&self, syntax: PathSyntax) -> Result<String> {
        let dir = match &self.dir {
            Some(dir) => dir.to_string_lossy().into_owned(),
            None => {
                let exe = self.exe.to_string_lossy();
                syntax
                    .parent_dir(&exe)
                    .map(str::to_string)
                    .ok_or_else(|| invalid(&self.name, "executable path has no directory"))?
            }
        };

        if !syntax.accepts(&dir) {
            return Err(invalid(
                &self.name,
                &format!(
                    "directory '{}' is empty or contains the PATH separator '{}'",
                    dir,
                    syntax.separator()
                ),
            ));
        }
        if !syntax.is_absolute(&dir) {
            return Err(invalid(
                &self.name,
                &format!("directory '{}' is not absolute", dir),
            ));
        }

        Ok(dir)
    }
}

fn invalid(name: &str, detail: &str) -> PathregError {
    PathregError::ConfigValidationError {
        message: format!("Registration '{}': {}", name, detail),
    }
}

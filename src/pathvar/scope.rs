//! Persistence scopes for the PATH variable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which persistence tier a PATH value is read from and written to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceScope {
    /// System-wide; writing usually needs elevated privileges.
    Machine,
    /// Current account only.
    #[default]
    User,
}

impl PersistenceScope {
    /// Lowercase name, as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::User => "user",
        }
    }
}

impl fmt::Display for PersistenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistenceScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "machine" | "system" => Ok(Self::Machine),
            "user" => Ok(Self::User),
            _ => Err(format!("unknown scope: {}", s)),
        }
    }
}

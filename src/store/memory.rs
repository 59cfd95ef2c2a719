//! In-memory PATH store.
//!
//! # Example
//!
//! ```
//! use pathreg::pathvar::{PathSyntax, PersistenceScope};
//! use pathreg::store::{MemoryStore, PathStore};
//!
//! let mut store = MemoryStore::new(PathSyntax::Posix)
//!     .with_value(PersistenceScope::User, "/usr/bin");
//! store.set(PersistenceScope::User, "/usr/bin:/opt/bin").unwrap();
//!
//! assert_eq!(store.value(PersistenceScope::User), "/usr/bin:/opt/bin");
//! assert_eq!(store.writes(), 1);
//! ```

use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{PathregError, Result};
use crate::pathvar::{PathSyntax, PersistenceScope};

use super::PathStore;

/// A [`PathStore`] kept in memory, counting every access.
#[derive(Debug)]
pub struct MemoryStore {
    syntax: PathSyntax,
    values: HashMap<PersistenceScope, String>,
    reject_writes: bool,
    reads: Cell<usize>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(syntax: PathSyntax) -> Self {
        Self {
            syntax,
            values: HashMap::new(),
            reject_writes: false,
            reads: Cell::new(0),
            writes: 0,
        }
    }

    /// Seed the value for a scope.
    pub fn with_value(mut self, scope: PersistenceScope, value: impl Into<String>) -> Self {
        self.values.insert(scope, value.into());
        self
    }

    /// Make every `set` fail as if the platform denied access.
    pub fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Current value for a scope (empty if never set).
    pub fn value(&self, scope: PersistenceScope) -> &str {
        self.values.get(&scope).map(String::as_str).unwrap_or("")
    }

    /// Number of successful or attempted `get` calls.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of attempted `set` calls, including rejected ones.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PathStore for MemoryStore {
    fn syntax(&self) -> PathSyntax {
        self.syntax
    }

    fn get(&self, scope: PersistenceScope) -> Result<String> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.value(scope).to_string())
    }

    fn set(&mut self, scope: PersistenceScope, value: &str) -> Result<()> {
        self.writes += 1;
        if self.reject_writes {
            return Err(PathregError::StoreWriteFailed {
                scope,
                message: "access denied".to_string(),
            });
        }
        self.values.insert(scope, value.to_string());
        Ok(())
    }

    fn location(&self, scope: PersistenceScope) -> String {
        format!("memory ({})", scope)
    }
}

//! pathreg - Idempotent PATH registration for installed tools.
//!
//! pathreg makes sure the directory of an installed executable is on the
//! persistent `PATH` of the user or the whole machine, appending it only when
//! it isn't there yet, and confirms the result by asking the tool for its
//! version.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`pathvar`] - PATH values, segment comparison, and scopes
//! - [`probe`] - Version queries against the registered executable
//! - [`registrar`] - The idempotent registration operation
//! - [`shell`] - Subprocess execution and platform checks
//! - [`store`] - Persistent PATH storage per platform
//! - [`ui`] - Spinners, prompts, and terminal output
//!
//! # Example
//!
//! ```
//! use pathreg::pathvar::{PathList, PathSyntax};
//!
//! let path = PathList::new(r"C:\Windows;C:\Tools", PathSyntax::Windows);
//! assert!(!path.contains(r"C:\Program Files\Git\cmd"));
//!
//! let updated = path.appended(r"C:\Program Files\Git\cmd");
//! assert_eq!(updated.raw(), r"C:\Windows;C:\Tools;C:\Program Files\Git\cmd");
//! assert!(updated.contains(r"c:\program files\git\cmd\"));
//! ```
//!
//! For registration against a store, see [`registrar`].

pub mod cli;
pub mod config;
pub mod error;
pub mod pathvar;
pub mod probe;
pub mod registrar;
pub mod shell;
pub mod store;
pub mod ui;

pub use error::{PathregError, Result};

//! The PATH value model.
//!
//! - [`list`] - Delimited values and per-platform comparison rules
//! - [`scope`] - Machine vs. user persistence tiers

pub mod list;
pub mod scope;

pub use list::{PathList, PathSyntax};
pub use scope::PersistenceScope;

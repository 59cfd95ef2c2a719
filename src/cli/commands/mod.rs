//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that touch the PATH also
//! expose a `run` method taking the store (and probe) explicitly, so tests
//! can drive them with in-memory fakes.

pub mod apply;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod ensure;
pub mod register;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

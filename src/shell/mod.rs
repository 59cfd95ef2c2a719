//! Process execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{execute, execute_check, CommandOptions, CommandResult};
pub use platform::{expand_home, is_ci, is_elevated};

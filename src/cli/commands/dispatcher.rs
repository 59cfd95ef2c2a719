//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{ApplyArgs, Cli, Commands};
use crate::config::{load_config, LoadedConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    cwd: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    ///
    /// `config_path` is the `--config` override, if any.
    pub fn new(cwd: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self { cwd, config_path }
    }

    /// Get the working directory used for config discovery.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn load(&self) -> Result<LoadedConfig> {
        load_config(&self.cwd, self.config_path.as_deref())
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. The config file is only read by commands that use it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Ensure(args)) => {
                let settings = self.load()?.config.settings;
                super::ensure::EnsureCommand::new(args.clone(), settings).execute(ui)
            }
            Some(Commands::Apply(args)) => {
                let cmd = super::apply::ApplyCommand::new(&self.cwd, args.clone(), self.load()?);
                cmd.execute(ui)
            }
            Some(Commands::Check(args)) => {
                let settings = self.load()?.config.settings;
                super::check::CheckCommand::new(args.clone(), settings).execute(ui)
            }
            Some(Commands::Show(args)) => {
                let settings = self.load()?.config.settings;
                super::show::ShowCommand::new(args.clone(), settings).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to apply with default args
                let cmd =
                    super::apply::ApplyCommand::new(&self.cwd, ApplyArgs::default(), self.load()?);
                cmd.execute(ui)
            }
        }
    }
}

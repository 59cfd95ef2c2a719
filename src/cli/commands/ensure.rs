//! Ensure command implementation.
//!
//! The `pathreg ensure` command registers a single executable given on the
//! command line.

use crate::cli::args::EnsureArgs;
use crate::config::{validate_settings, Settings};
use crate::error::Result;
use crate::probe::{CommandProbe, VersionProbe};
use crate::registrar::Registration;
use crate::store::{default_store, PathStore};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::register::{register, RegisterOptions};

/// The ensure command implementation.
pub struct EnsureCommand {
    args: EnsureArgs,
    settings: Settings,
}

impl EnsureCommand {
    /// Create a new ensure command.
    pub fn new(args: EnsureArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    /// The registration described by the arguments and settings.
    pub fn registration(&self) -> Registration {
        let mut registration = Registration::for_exe(self.args.exe.clone())
            .with_scope(self.args.scope.unwrap_or(self.settings.scope))
            .with_version_arg(
                self.args
                    .version_arg
                    .clone()
                    .unwrap_or_else(|| self.settings.version_arg.clone()),
            );
        if let Some(dir) = &self.args.dir {
            registration = registration.with_dir(dir.clone());
        }
        registration
    }

    /// Run against explicit store and probe.
    pub fn run(
        &self,
        ui: &mut dyn UserInterface,
        store: &mut dyn PathStore,
        probe: &dyn VersionProbe,
    ) -> Result<CommandResult> {
        if self.args.json {
            ui.set_output_mode(OutputMode::Silent);
        }

        validate_settings(&self.settings)?;

        let options = RegisterOptions {
            dry_run: self.args.dry_run,
            verify_first: self.args.verify_first || self.settings.verify_first,
            yes: self.args.yes,
        };

        let registered = register(ui, store, probe, &self.registration(), options)?;
        let Some(report) = registered.into_report() else {
            return Ok(CommandResult::failure(1));
        };

        if self.args.json {
            println!("{}", display::to_json(&report)?);
        }

        let code = report.exit_code();
        if code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(code))
        }
    }
}

impl Command for EnsureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = default_store(&self.settings)?;
        let probe = CommandProbe::new(self.settings.probe_timeout());
        self.run(ui, store.as_mut(), &probe)
    }
}

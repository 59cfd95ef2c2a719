//! Apply command implementation.
//!
//! The `pathreg apply` command runs the registrations defined in the config
//! file. It is also what runs when no subcommand is given.

use std::path::{Path, PathBuf};

use crate::cli::args::ApplyArgs;
use crate::config::{validate, LoadedConfig, PROJECT_CONFIG};
use crate::error::{PathregError, Result};
use crate::probe::{CommandProbe, VersionProbe};
use crate::registrar::{Outcome, Registration};
use crate::store::{default_store, PathStore};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::register::{register, RegisterOptions};

/// The apply command implementation.
pub struct ApplyCommand {
    cwd: PathBuf,
    args: ApplyArgs,
    loaded: LoadedConfig,
}

impl ApplyCommand {
    /// Create a new apply command.
    pub fn new(cwd: &Path, args: ApplyArgs, loaded: LoadedConfig) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            args,
            loaded,
        }
    }

    /// The registrations to run, in config order, filtered by the given names.
    pub fn selected(&self) -> Result<Vec<Registration>> {
        let all = self.loaded.config.registrations();

        if all.is_empty() {
            return Err(match &self.loaded.source {
                None => PathregError::ConfigNotFound {
                    path: self.cwd.join(PROJECT_CONFIG),
                },
                Some(path) => PathregError::ConfigValidationError {
                    message: format!("No registrations defined in {}", path.display()),
                },
            });
        }

        if self.args.names.is_empty() {
            return Ok(all);
        }

        if let Some(unknown) = self
            .args
            .names
            .iter()
            .find(|name| !self.loaded.config.registrations.contains_key(*name))
        {
            return Err(PathregError::UnknownRegistration {
                name: unknown.clone(),
            });
        }

        Ok(all
            .into_iter()
            .filter(|r| self.args.names.contains(&r.name))
            .collect())
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

        validate(&self.loaded.config, store.syntax())?;
        let registrations = self.selected()?;

        if let Some(source) = &self.loaded.source {
            ui.show_header(&format!(
                "Applying {} registration{} from {}",
                registrations.len(),
                if registrations.len() == 1 { "" } else { "s" },
                source.display()
            ));
        }

        let options = RegisterOptions {
            dry_run: self.args.dry_run,
            verify_first: self.loaded.config.settings.verify_first,
            yes: self.args.yes,
        };

        let mut reports = Vec::new();
        let mut exit_code = 0;
        for registration in &registrations {
            match register(ui, store, probe, registration, options) {
                Ok(registered) => {
                    exit_code = exit_code.max(registered.exit_code());
                    reports.extend(registered.into_report());
                }
                Err(e) => {
                    ui.error(&format!("{}: {}", registration.name, e));
                    exit_code = exit_code.max(1);
                }
            }
        }

        if self.args.json {
            println!("{}", display::to_json(&reports)?);
        } else if reports.len() > 1 {
            let changed = reports
                .iter()
                .filter(|r| matches!(r.outcome, Outcome::Added | Outcome::WouldAdd))
                .count();
            let failed = reports.iter().filter(|r| !r.outcome.is_success()).count();
            ui.message(&format!(
                "\n{} changed, {} unchanged, {} failed",
                changed,
                reports.len() - changed - failed,
                failed
            ));
        }

        if exit_code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(exit_code))
        }
    }
}

impl Command for ApplyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = default_store(&self.loaded.config.settings)?;
        let probe = CommandProbe::new(self.loaded.config.settings.probe_timeout());
        self.run(ui, store.as_mut(), &probe)
    }
}

//! Check command implementation.
//!
//! The `pathreg check` command reports whether a directory is on the
//! persistent PATH without changing anything.

use crate::cli::args::CheckArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::registrar::is_registered;
use crate::store::{default_store, PathStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    settings: Settings,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    /// Run against an explicit store.
    pub fn run(&self, ui: &mut dyn UserInterface, store: &dyn PathStore) -> Result<CommandResult> {
        let scope = self.args.scope.unwrap_or(self.settings.scope);

        if is_registered(store, scope, &self.args.dir)? {
            ui.success(&format!("{} is on the {} PATH", self.args.dir, scope));
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!("{} is not on the {} PATH", self.args.dir, scope));
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = default_store(&self.settings)?;
        self.run(ui, store.as_ref())
    }
}

//! Show command implementation.
//!
//! The `pathreg show` command lists the entries of a scope's persistent
//! PATH, flagging duplicates and directories that don't exist.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::cli::args::ShowArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::pathvar::{PathList, PersistenceScope};
use crate::store::{default_store, PathStore};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;

/// One PATH entry as shown by `pathreg show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub dir: String,
    pub exists: bool,
    /// An earlier entry names the same directory.
    pub duplicate: bool,
}

/// `--json` output of `pathreg show`.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub scope: PersistenceScope,
    pub location: String,
    pub value: String,
    pub entries: Vec<Entry>,
}

impl Listing {
    /// Read `scope` from `store` and classify its entries.
    pub fn read(store: &dyn PathStore, scope: PersistenceScope) -> Result<Self> {
        let list = PathList::new(store.get(scope)?, store.syntax());
        let syntax = list.syntax();

        let mut seen = HashSet::new();
        let entries = list
            .segments()
            .map(|segment| {
                let dir = segment.trim().trim_matches('"').to_string();
                Entry {
                    exists: Path::new(&dir).is_dir(),
                    duplicate: !seen.insert(syntax.normalize(segment)),
                    dir,
                }
            })
            .collect();

        Ok(Self {
            scope,
            location: store.location(scope),
            value: list.into_raw(),
            entries,
        })
    }
}

/// The show command implementation.
pub struct ShowCommand {
    args: ShowArgs,
    settings: Settings,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(args: ShowArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    /// Run against an explicit store.
    pub fn run(&self, ui: &mut dyn UserInterface, store: &dyn PathStore) -> Result<CommandResult> {
        let scope = self.args.scope.unwrap_or(self.settings.scope);
        let listing = Listing::read(store, scope)?;

        if self.args.json {
            ui.set_output_mode(OutputMode::Silent);
            println!("{}", display::to_json(&listing)?);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("{} PATH ({})", scope, listing.location));
        for (i, entry) in listing.entries.iter().enumerate() {
            let mut line = format!("{:>3}  {}", i + 1, entry.dir);
            if entry.duplicate {
                line.push_str("  (duplicate)");
            }
            if !entry.exists {
                line.push_str("  (missing)");
            }
            ui.message(&line);
        }

        let duplicates = listing.entries.iter().filter(|e| e.duplicate).count();
        let missing = listing.entries.iter().filter(|e| !e.exists).count();
        ui.message(&format!(
            "\n{} entries, {} duplicate, {} missing",
            listing.entries.len(),
            duplicates,
            missing
        ));

        Ok(CommandResult::success())
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = default_store(&self.settings)?;
        self.run(ui, store.as_ref())
    }
}

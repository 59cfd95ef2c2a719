//! The registration flow shared by `ensure` and `apply`.

use crate::error::{PathregError, Result};
use crate::pathvar::PersistenceScope;
use crate::probe::VersionProbe;
use crate::registrar::{Outcome, PathRegistrar, RegistrarOptions, Registration, Report};
use crate::shell::is_elevated;
use crate::store::PathStore;
use crate::ui::UserInterface;

use super::display;

/// Switches for one registration run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterOptions {
    pub dry_run: bool,
    pub verify_first: bool,
    /// Skip the machine-scope confirmation.
    pub yes: bool,
}

/// How one registration run ended.
#[derive(Debug)]
pub enum Registered {
    /// The registrar produced a report (success or failure outcome).
    Report(Report),
    /// The user declined the machine-scope confirmation.
    Declined,
    /// The registrar returned an error, already shown on the status line.
    Failed(PathregError),
}

impl Registered {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Report(report) => report.exit_code(),
            Self::Declined | Self::Failed(_) => 1,
        }
    }

    pub fn into_report(self) -> Option<Report> {
        match self {
            Self::Report(report) => Some(report),
            _ => None,
        }
    }
}

/// Run one registration with status output.
///
/// `Err` is returned only for failures before the status line is started,
/// so callers report it themselves.
pub fn register(
    ui: &mut dyn UserInterface,
    store: &mut dyn PathStore,
    probe: &dyn VersionProbe,
    registration: &Registration,
    options: RegisterOptions,
) -> Result<Registered> {
    if needs_confirmation(ui, registration, options) {
        let dir = registration.target_dir(store.syntax())?;
        let question = format!(
            "Add {} to the machine PATH ({})?",
            dir,
            store.location(PersistenceScope::Machine)
        );
        if !ui.confirm(&question, true)? {
            ui.warning(&format!("Skipped {}: not confirmed", registration.name));
            return Ok(Registered::Declined);
        }
    }

    let mut spinner = ui.start_spinner(&format!(
        "Registering {} in the {} PATH...",
        registration.name, registration.scope
    ));

    let registrar_options = RegistrarOptions {
        dry_run: options.dry_run,
        verify_first: options.verify_first,
    };
    let report =
        match PathRegistrar::new(store, probe, registrar_options).ensure_registered(registration) {
            Ok(report) => report,
            Err(e) => {
                spinner.finish_error(&format!("{}: {}", registration.name, e));
                return Ok(Registered::Failed(e));
            }
        };

    display::finish_spinner(spinner.as_mut(), &report);
    display::show_details(ui, &report);
    show_hints(ui, &report);

    Ok(Registered::Report(report))
}

fn needs_confirmation(
    ui: &dyn UserInterface,
    registration: &Registration,
    options: RegisterOptions,
) -> bool {
    registration.scope == PersistenceScope::Machine
        && !options.dry_run
        && !options.yes
        && ui.is_interactive()
        && registration.exe.is_file()
}

fn show_hints(ui: &mut dyn UserInterface, report: &Report) {
    match report.outcome {
        Outcome::Added => ui.show_hint("Open a new shell to pick up the change."),
        Outcome::WriteFailed if report.scope == PersistenceScope::Machine && !is_elevated() => {
            let how = if cfg!(windows) {
                "from an elevated (Administrator) prompt"
            } else {
                "as root (for example with sudo)"
            };
            ui.show_hint(&format!(
                "Writing the machine PATH needs elevated privileges; re-run {}.",
                how
            ));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathvar::PathSyntax;
    use crate::probe::{FakeProbe, ProbeOutput};
    use crate::store::MemoryStore;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn tool(temp: &TempDir) -> Registration {
        let exe = temp.path().join("tool");
        std::fs::write(&exe, "").unwrap();
        Registration::new("tool", exe).with_dir("/opt/tool/bin")
    }

    #[test]
    fn added_shows_success_and_new_shell_hint() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new(PathSyntax::Posix);
        let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.4.2"));
        let mut ui = MockUI::new();

        let report = register(
            &mut ui,
            &mut store,
            &probe,
            &tool(&temp),
            RegisterOptions::default(),
        )
        .unwrap()
        .into_report()
        .unwrap();

        assert_eq!(report.outcome, Outcome::Added);
        assert!(ui.has_success("Added /opt/tool/bin to the user PATH (tool 1.4.2)"));
        assert!(ui.has_hint("new shell"));
        assert!(ui.confirms_shown().is_empty());
    }

    #[test]
    fn interactive_machine_write_asks_first() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new(PathSyntax::Posix);
        let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.0"));
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_confirm_response(false);
        let registration = tool(&temp).with_scope(PersistenceScope::Machine);

        let result = register(
            &mut ui,
            &mut store,
            &probe,
            &registration,
            RegisterOptions::default(),
        )
        .unwrap();

        assert!(matches!(result, Registered::Declined));
        assert_eq!(result.exit_code(), 1);
        assert_eq!(ui.confirms_shown().len(), 1);
        assert!(ui.confirms_shown()[0].contains("/opt/tool/bin"));
        assert!(ui.has_warning("not confirmed"));
        assert_eq!(store.reads(), 0);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn yes_skips_confirmation() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new(PathSyntax::Posix);
        let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.0"));
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_confirm_response(false);
        let registration = tool(&temp).with_scope(PersistenceScope::Machine);
        let options = RegisterOptions {
            yes: true,
            ..Default::default()
        };

        let report = register(&mut ui, &mut store, &probe, &registration, options)
            .unwrap()
            .into_report()
            .unwrap();

        assert_eq!(report.outcome, Outcome::Added);
        assert!(ui.confirms_shown().is_empty());
    }

    #[test]
    fn rejected_write_is_an_error_line() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new(PathSyntax::Posix).rejecting_writes();
        let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.0"));
        let mut ui = MockUI::new();

        let report = register(
            &mut ui,
            &mut store,
            &probe,
            &tool(&temp),
            RegisterOptions::default(),
        )
        .unwrap()
        .into_report()
        .unwrap();

        assert_eq!(report.outcome, Outcome::WriteFailed);
        assert!(ui.has_error("access denied"));
        assert!(!ui.has_hint("new shell"));
    }

    #[test]
    fn registrar_error_is_shown_once_on_the_status_line() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new(PathSyntax::Posix);
        let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.0"));
        let mut ui = MockUI::new();
        let registration = tool(&temp).with_dir("relative/bin");

        let result = register(
            &mut ui,
            &mut store,
            &probe,
            &registration,
            RegisterOptions::default(),
        )
        .unwrap();

        assert!(matches!(
            result,
            Registered::Failed(PathregError::ConfigValidationError { .. })
        ));
        assert_eq!(result.exit_code(), 1);
        assert!(ui.has_error("not absolute"));
        assert!(ui.errors().is_empty());
        assert_eq!(ui.spinners().len(), 1);
    }
}

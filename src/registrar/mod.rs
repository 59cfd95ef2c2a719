//! Idempotent PATH registration.
//!
//! [`PathRegistrar`] runs one [`Registration`] against a [`PathStore`]:
//!
//! ```text
//! exists? ──no──► NotFound
//!    │yes
//! read scope ── contains dir? ──yes──► AlreadyPresent ─► verify
//!    │no
//! append ─► write ──rejected──► WriteFailed
//!    │ok
//! Added ─► verify
//! ```
//!
//! Verification runs the executable with its version argument. It is a
//! confirmation signal only: a failure is reported as a warning and the
//! write stays committed. With [`RegistrarOptions::verify_first`] the probe
//! runs before the write instead and a failure aborts the registration.
//!
//! # Example
//!
//! ```
//! use pathreg::pathvar::{PathSyntax, PersistenceScope};
//! use pathreg::probe::{FakeProbe, ProbeOutput};
//! use pathreg::registrar::{Outcome, PathRegistrar, RegistrarOptions, Registration};
//! use pathreg::store::MemoryStore;
//!
//! let exe = std::env::current_exe().unwrap();
//! let dir = exe.parent().unwrap().to_string_lossy().into_owned();
//!
//! let mut store = MemoryStore::new(PathSyntax::native());
//! let probe = FakeProbe::returning(ProbeOutput::ok("tool 1.0.0"));
//! let mut registrar = PathRegistrar::new(&mut store, &probe, RegistrarOptions::default());
//!
//! let registration = Registration::for_exe(&exe);
//! let first = registrar.ensure_registered(&registration).unwrap();
//! let second = registrar.ensure_registered(&registration).unwrap();
//!
//! assert_eq!(first.outcome, Outcome::Added);
//! assert_eq!(second.outcome, Outcome::AlreadyPresent);
//! assert_eq!(store.value(PersistenceScope::User), dir);
//! ```

pub mod registration;
pub mod report;

pub use registration::Registration;
pub use report::{Outcome, Report, Verification};

use tracing::{debug, info, warn};

use crate::error::{PathregError, Result};
use crate::pathvar::{PathList, PersistenceScope};
use crate::probe::VersionProbe;
use crate::store::PathStore;

/// Behaviour switches for [`PathRegistrar`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrarOptions {
    /// Compute the new value but don't write it.
    pub dry_run: bool,
    /// Run the version probe before writing and skip the write if it fails.
    pub verify_first: bool,
}

/// Ensures directories are present in a persistent PATH.
pub struct PathRegistrar<'a> {
    store: &'a mut dyn PathStore,
    probe: &'a dyn VersionProbe,
    options: RegistrarOptions,
}

impl<'a> PathRegistrar<'a> {
    pub fn new(
        store: &'a mut dyn PathStore,
        probe: &'a dyn VersionProbe,
        options: RegistrarOptions,
    ) -> Self {
        Self {
            store,
            probe,
            options,
        }
    }

    pub fn options(&self) -> RegistrarOptions {
        self.options
    }

    /// Make sure the registration's directory is on its scope's PATH.
    ///
    /// Failure outcomes (`NotFound`, `WriteFailed`, `VerificationFailed`) are
    /// reported in the [`Report`]. `Err` is returned for invalid
    /// registrations and for stores that can't be read.
    pub fn ensure_registered(&mut self, registration: &Registration) -> Result<Report> {
        let syntax = self.store.syntax();
        let scope = registration.scope;

        if !registration.exe.is_file() {
            let err = PathregError::DependencyNotFound {
                path: registration.exe.clone(),
            };
            info!("{}", err);
            let dir = registration.target_dir(syntax).unwrap_or_default();
            let mut report = Report::new(registration, dir, self.store.location(scope));
            report.outcome = Outcome::NotFound;
            report.error = Some(err.to_string());
            return Ok(report);
        }

        let dir = registration.target_dir(syntax)?;
        let mut report = Report::new(registration, dir.clone(), self.store.location(scope));

        let current = PathList::new(self.store.get(scope)?, syntax);
        report.previous = Some(current.raw().to_string());

        if current.contains(&dir) {
            debug!("{} is already on the {} PATH", dir, scope);
            report.outcome = Outcome::AlreadyPresent;
            report.verification = self.verify(registration);
            return Ok(report);
        }

        let updated = current.appended(&dir);
        report.updated = Some(updated.raw().to_string());

        if self.options.verify_first {
            report.verification = self.verify(registration);
            if let Verification::Failed { reason } = &report.verification {
                report.error = Some(
                    PathregError::VerificationFailed {
                        exe: registration.exe.clone(),
                        message: reason.clone(),
                    }
                    .to_string(),
                );
                report.outcome = Outcome::VerificationFailed;
                return Ok(report);
            }
        }

        if self.options.dry_run {
            debug!("Dry run: not writing {} PATH", scope);
            report.outcome = Outcome::WouldAdd;
            if !self.options.verify_first {
                report.verification = self.verify(registration);
            }
            return Ok(report);
        }

        match self.store.set(scope, updated.raw()) {
            Ok(()) => {
                info!("Added {} to the {} PATH", dir, scope);
                report.outcome = Outcome::Added;
            }
            Err(err @ PathregError::StoreWriteFailed { .. }) => {
                info!("{}", err);
                report.outcome = Outcome::WriteFailed;
                report.updated = None;
                report.error = Some(err.to_string());
                return Ok(report);
            }
            Err(err) => return Err(err),
        }

        if !self.options.verify_first {
            report.verification = self.verify(registration);
        }
        Ok(report)
    }

    fn verify(&self, registration: &Registration) -> Verification {
        match self.probe.run(&registration.exe, &registration.version_arg) {
            Ok(output) => match output.failure_reason() {
                None => Verification::Passed {
                    version: output.version(),
                    summary: output.summary().map(str::to_string),
                },
                Some(reason) => {
                    warn!(
                        "{} {} {}",
                        registration.exe.display(),
                        registration.version_arg,
                        reason
                    );
                    Verification::Failed { reason }
                }
            },
            Err(err) => {
                warn!("{}", err);
                Verification::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Whether `dir` is already on the `scope` PATH held by `store`.
pub fn is_registered(store: &dyn PathStore, scope: PersistenceScope, dir: &str) -> Result<bool> {
    let current = PathList::new(store.get(scope)?, store.syntax());
    Ok(current.contains(dir))
}

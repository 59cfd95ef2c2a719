//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::pathvar::PersistenceScope;

/// pathreg - Idempotent PATH registration for installed tools.
#[derive(Debug, Parser)]
#[command(name = "pathreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./.pathreg.yml)
    #[arg(short, long, global = true, env = "PATHREG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Put one executable's directory on PATH
    Ensure(EnsureArgs),

    /// Apply the registrations from the config file (default)
    Apply(ApplyArgs),

    /// Check whether a directory is on PATH
    Check(CheckArgs),

    /// Show the persistent PATH for a scope
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ensure` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EnsureArgs {
    /// Absolute path of the executable
    #[arg(long, value_name = "PATH")]
    pub exe: PathBuf,

    /// Directory to register (defaults to the executable's directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Where to persist the change
    #[arg(long, value_enum)]
    pub scope: Option<PersistenceScope>,

    /// Argument that makes the executable print its version
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub version_arg: Option<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Check the version before writing and skip the write if it fails
    #[arg(long)]
    pub verify_first: bool,

    /// Don't ask before writing the machine PATH
    #[arg(short, long)]
    pub yes: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ApplyArgs {
    /// Registrations to apply (all when omitted)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Don't ask before writing the machine PATH
    #[arg(short, long)]
    pub yes: bool,

    /// Print the reports as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Directory to look for
    #[arg(long, value_name = "DIR")]
    pub dir: String,

    /// Scope to read
    #[arg(long, value_enum)]
    pub scope: Option<PersistenceScope>,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Scope to read
    #[arg(long, value_enum)]
    pub scope: Option<PersistenceScope>,

    /// Print the entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ensure() {
        let cli = Cli::parse_from([
            "pathreg",
            "ensure",
            "--exe",
            "/opt/tool/bin/tool",
            "--scope",
            "machine",
            "--version-arg=-V",
            "--dry-run",
        ]);
        match cli.command {
            Some(Commands::Ensure(args)) => {
                assert_eq!(args.exe, PathBuf::from("/opt/tool/bin/tool"));
                assert_eq!(args.scope, Some(PersistenceScope::Machine));
                assert_eq!(args.version_arg.as_deref(), Some("-V"));
                assert!(args.dry_run);
                assert!(!args.yes);
            }
            other => panic!("expected ensure, got {:?}", other),
        }
    }

    #[test]
    fn version_arg_accepts_long_flag_value() {
        let cli = Cli::parse_from([
            "pathreg",
            "ensure",
            "--exe",
            "/opt/tool/bin/tool",
            "--version-arg=--version",
        ]);
        match cli.command {
            Some(Commands::Ensure(args)) => {
                assert_eq!(args.version_arg.as_deref(), Some("--version"));
            }
            other => panic!("expected ensure, got {:?}", other),
        }
    }

    #[test]
    fn parses_apply_names() {
        let cli = Cli::parse_from(["pathreg", "apply", "git", "node", "--yes"]);
        match cli.command {
            Some(Commands::Apply(args)) => {
                assert_eq!(args.names, vec!["git", "node"]);
                assert!(args.yes);
            }
            other => panic!("expected apply, got {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["pathreg", "--quiet"]);
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pathreg", "show", "--scope", "user", "--no-color", "-v"]);
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_unknown_scope() {
        let result = Cli::try_parse_from(["pathreg", "check", "--dir", "/x", "--scope", "global"]);
        assert!(result.is_err());
    }
}

//! Library integration tests.

use pathreg::PathregError;

#[test]
fn error_types_are_public() {
    let err = PathregError::UnknownRegistration {
        name: "git".into(),
    };
    assert!(err.to_string().contains("git"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> pathreg::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use pathreg::cli::{Cli, Commands};
    use pathreg::pathvar::PersistenceScope;

    let cli = Cli::parse_from(["pathreg", "show", "--scope", "machine", "--json"]);

    if let Some(Commands::Show(args)) = cli.command {
        assert_eq!(args.scope, Some(PersistenceScope::Machine));
        assert!(args.json);
    } else {
        panic!("Expected Show command");
    }
}

#[test]
fn config_round_trips_through_public_api() {
    use pathreg::config::{parse_config, validate, PathregConfig};
    use pathreg::pathvar::PathSyntax;
    use std::path::Path;

    let yaml = r#"
settings:
  scope: machine
registrations:
  git:
    exe: /opt/git/bin/git
"#;
    let config: PathregConfig = parse_config(yaml, Path::new("pathreg.yml")).unwrap();
    assert!(validate(&config, PathSyntax::Posix).is_ok());

    let registrations = config.registrations();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].name, "git");
    assert_eq!(registrations[0].target_dir(PathSyntax::Posix).unwrap(), "/opt/git/bin");
}

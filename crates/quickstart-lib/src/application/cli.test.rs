use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> CliConfig {
    let mut argv = vec!["quickstart"];
    argv.extend_from_slice(args);
    CliConfig::load_from(argv).unwrap()
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_defaults() {
    let config = parse(&[]);
    assert_eq!(config.run, RunConfiguration::default());
    assert_eq!(config.run.mode, RunMode::Development);
    assert_eq!(config.run.port, 3000);
    assert!(!config.run.check_only);
    assert!(!config.run.setup_only);
}

#[test]
fn test_prod_wins_over_dev() {
    let config = parse(&["--dev", "--prod"]);
    assert_eq!(config.run.mode, RunMode::Production);
}

#[test]
fn test_short_flags() {
    let config = parse(&["-p", "-c", "-s"]);
    assert_eq!(config.run.mode, RunMode::Production);
    assert!(config.run.check_only);
    assert!(config.run.setup_only);
}

#[test]
fn test_port_and_provisioning_flags() {
    let config = parse(&["--port", "8080", "--skip-deps", "--force-seed"]);
    assert_eq!(config.run.port, 8080);
    assert!(config.run.skip_deps);
    assert!(config.run.force_seed);
}

#[test]
fn test_port_zero_rejected() {
    assert!(CliConfig::load_from(["quickstart", "--port", "0"]).is_err());
}

#[test]
fn test_port_non_numeric_rejected() {
    assert!(CliConfig::load_from(["quickstart", "--port", "http"]).is_err());
}

#[test]
fn test_version_flag_is_display_request() {
    let err = CliConfig::load_from(["quickstart", "--version"]).err().unwrap();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_global_options_flatten() {
    let config = parse(&["--color", "never", "--log-level", "2", "-w", "/tmp"]);
    assert_eq!(
        config.app_config.color,
        crate::primitives::TerminalCapsDetectIntent::Never
    );
    assert_eq!(config.app_config.log_level, 2);
    assert_eq!(
        config.app_config.workdir,
        Some(std::path::PathBuf::from("/tmp"))
    );
}

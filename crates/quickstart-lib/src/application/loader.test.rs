use super::*;
use crate::primitives::TerminalCapsDetectIntent;
use crate::testing::TempDirFixture;

#[test]
fn test_resolve_applies_environment_to_auto_color() {
    let fixture = TempDirFixture::new().unwrap();
    let config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let resolved = config.resolve(&env_config).unwrap();
    assert_eq!(resolved.color, TerminalCapsDetectIntent::Never);
    assert_eq!(resolved.workdir, Some(fixture.path().to_path_buf()));
}

#[test]
fn test_resolve_keeps_cli_color() {
    let fixture = TempDirFixture::new().unwrap();
    let config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        color: TerminalCapsDetectIntent::Always,
        ..AppConfig::default()
    };
    let env_config = EnvironmentConfig {
        ci: Some("true".to_string()),
        ..EnvironmentConfig::default()
    };

    let resolved = config.resolve(&env_config).unwrap();
    assert_eq!(resolved.color, TerminalCapsDetectIntent::Always);
}

#[test]
fn test_resolve_rejects_invalid_workdir() {
    let fixture = TempDirFixture::new().unwrap();
    let config = AppConfig {
        workdir: Some(fixture.path().join("nope")),
        ..AppConfig::default()
    };

    assert!(config.resolve(&EnvironmentConfig::default()).is_err());
}

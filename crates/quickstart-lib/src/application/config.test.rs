use super::*;
use crate::terminal::TerminalCapabilities;
use crate::testing::TempDirFixture;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.workdir, None);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, TerminalCapsDetectIntent::Auto);
}

#[test]
fn test_logger_config_conversion() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };
    let logger_config = config.to_logger_config(&TerminalCapabilities::plain());

    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Json);
    assert_eq!(logger_config.output, LogOutput::Stderr);
}

#[test]
fn test_validate_keeps_existing_directory() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.project_dir(), fixture.path());
}

#[test]
fn test_validate_rejects_missing_directory() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(fixture.path().join("missing")),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkDir { .. }));
}

#[test]
fn test_validate_rejects_file_as_directory() {
    let fixture = TempDirFixture::new().unwrap();
    let file = fixture.write_file("package.json", "{}").unwrap();
    let mut config = AppConfig {
        workdir: Some(file),
        ..AppConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_falls_back_to_current_dir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert_eq!(config.workdir, Some(std::env::current_dir().unwrap()));
}

#[test]
fn test_project_dir_before_validation() {
    assert_eq!(AppConfig::default().project_dir(), Path::new("."));
}

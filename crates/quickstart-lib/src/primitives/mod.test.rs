use super::*;

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
}

#[test]
fn test_log_level_filter_directives() {
    assert_eq!(LogLevel::Error.as_filter(), "error");
    assert_eq!(LogLevel::Warning.as_filter(), "warn");
    assert_eq!(LogLevel::Trace.as_filter(), "trace");
}

#[test]
fn test_log_format_aliases() {
    assert_eq!("txt".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!("yml".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
}

#[test]
fn test_log_output_parsing() {
    assert_eq!("stderr".parse::<LogOutput>().unwrap(), LogOutput::Stderr);
    assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
}

#[test]
fn test_invalid_value_reports_parse_error() {
    let err = "loud".parse::<LogFormat>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log format");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_color_intent_aliases() {
    assert_eq!(
        "force".parse::<TerminalCapsDetectIntent>().unwrap(),
        TerminalCapsDetectIntent::Always
    );
    assert_eq!(
        "off".parse::<TerminalCapsDetectIntent>().unwrap(),
        TerminalCapsDetectIntent::Never
    );
    assert_eq!(
        "detect".parse::<TerminalCapsDetectIntent>().unwrap(),
        TerminalCapsDetectIntent::Auto
    );
}

#[test]
fn test_run_mode_node_env_and_display() {
    assert_eq!(RunMode::default(), RunMode::Development);
    assert_eq!(RunMode::Development.node_env(), "development");
    assert_eq!(RunMode::Production.node_env(), "production");
    assert_eq!(RunMode::Development.to_string(), "dev");
    assert_eq!(RunMode::Production.to_string(), "prod");
}

#[test]
fn test_color_caps_enabled() {
    assert!(!TerminalColorCaps::None.is_enabled());
    assert!(TerminalColorCaps::Ansi16.is_enabled());
    assert!(TerminalColorCaps::TrueColor.is_enabled());
}

use super::*;
use crate::terminal::TerminalCapabilities;

#[test]
fn test_filter_directive_caps_external_crates() {
    let directive = filter_directive(LogLevel::Trace);
    assert!(directive.contains("quickstart_lib=trace"));
    assert!(directive.contains("tokio=warn"));
    assert!(directive.ends_with(",warn"));
}

#[test]
fn test_filter_directive_error_level() {
    let directive = filter_directive(LogLevel::Error);
    assert!(directive.contains("quickstart=error"));
    assert!(directive.contains("mio=error"));
}

#[test]
fn test_filter_directive_parses() {
    for level in [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert!(EnvFilter::try_new(filter_directive(level)).is_ok());
    }
}

#[test]
fn test_second_init_is_rejected() {
    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        terminal_caps: TerminalCapabilities::plain(),
    };

    // Another test may have installed a subscriber first; either way the
    // logger must never be initialised twice.
    let _ = Logger::init(config.clone());
    assert!(Logger::init(config).is_err());
}

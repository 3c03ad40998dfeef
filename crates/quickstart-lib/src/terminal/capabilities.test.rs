use super::*;

fn env_with(term: Option<&str>, colorterm: Option<&str>) -> TerminalEnvConfig {
    TerminalEnvConfig {
        term: term.map(str::to_string),
        colorterm: colorterm.map(str::to_string),
        ..TerminalEnvConfig::default()
    }
}

#[test]
fn test_truecolor_detection_via_colorterm() {
    let env_config = env_with(Some("xterm"), Some("truecolor"));
    assert_eq!(detect_color_level(&env_config), TerminalColorCaps::TrueColor);

    let env_config = env_with(None, Some("24bit"));
    assert_eq!(detect_color_level(&env_config), TerminalColorCaps::TrueColor);
}

#[test]
fn test_256_color_detection_via_term() {
    let env_config = env_with(Some("xterm-256color"), None);
    assert_eq!(detect_color_level(&env_config), TerminalColorCaps::Ansi256);
}

#[test]
fn test_basic_color_fallback() {
    let env_config = env_with(Some("vt100"), None);
    assert_eq!(detect_color_level(&env_config), TerminalColorCaps::Ansi16);
}

#[test]
fn test_never_intent_disables_color() {
    let env_config = env_with(Some("xterm-256color"), Some("truecolor"));
    assert_eq!(
        resolve_color(TerminalCapsDetectIntent::Never, &env_config, true),
        TerminalColorCaps::None
    );
}

#[test]
fn test_auto_intent_follows_terminal_support() {
    let env_config = env_with(Some("xterm-256color"), None);
    assert_eq!(
        resolve_color(TerminalCapsDetectIntent::Auto, &env_config, false),
        TerminalColorCaps::None
    );
    assert_eq!(
        resolve_color(TerminalCapsDetectIntent::Auto, &env_config, true),
        TerminalColorCaps::Ansi256
    );
}

#[test]
fn test_always_intent_ignores_terminal_support() {
    let env_config = env_with(None, None);
    assert_eq!(
        resolve_color(TerminalCapsDetectIntent::Always, &env_config, false),
        TerminalColorCaps::Ansi16
    );
}

#[test]
fn test_unicode_detection_via_lang() {
    let env_config = TerminalEnvConfig {
        lang: Some("en_US.UTF-8".to_string()),
        ..TerminalEnvConfig::default()
    };
    assert_eq!(
        detect_unicode_capabilities(&env_config, true),
        TerminalUnicodeCaps::Unicode
    );
}

#[test]
fn test_lc_all_overrides_lang() {
    let env_config = TerminalEnvConfig {
        lang: Some("en_US.UTF-8".to_string()),
        lc_all: Some("C".to_string()),
        ..TerminalEnvConfig::default()
    };
    assert_eq!(
        detect_unicode_capabilities(&env_config, true),
        TerminalUnicodeCaps::Ascii
    );
}

#[test]
fn test_plain_capabilities() {
    let caps = TerminalCapabilities::plain();
    assert_eq!(caps.color, TerminalColorCaps::None);
    assert!(!caps.is_tty);
}

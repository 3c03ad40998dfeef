use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::*;
use crate::platform::PlatformInfo;

fn toolchain() -> Toolchain {
    Toolchain::for_platform(&PlatformInfo {
        os: "linux",
        arch: "x86_64",
    })
}

#[test]
fn test_parse_major_version() {
    assert_eq!(parse_major_version("v20.11.1\n"), Some(20));
    assert_eq!(parse_major_version("18.0.0"), Some(18));
    assert_eq!(parse_major_version("v21.0.0-nightly2023"), Some(21));
    assert_eq!(parse_major_version("v16"), Some(16));
    assert_eq!(parse_major_version("not a version"), None);
    assert_eq!(parse_major_version(""), None);
}

#[test]
fn test_normalize_version() {
    assert_eq!(normalize_version(" v20.11.1\n"), "20.11.1");
    assert_eq!(normalize_version("10.2.4"), "10.2.4");
}

#[test]
fn test_supported_runtime_passes() {
    let session = MockCommandSession::new();

    assert!(check_runtime(&session, &toolchain()));
    assert!(
        session
            .display_provider
            .has_message("success", "Node.js version 20.11.1 found")
    );
}

#[test]
fn test_outdated_runtime_fails_with_remedy() {
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_runtime_version("v16.20.2"));

    assert!(!check_runtime(&session, &toolchain()));
    assert!(
        session
            .display_provider
            .has_message("error", "found version 16.20.2")
    );
    assert!(session.display_provider.has_message("info", "https://nodejs.org/"));
}

#[test]
fn test_missing_runtime_is_not_queried() {
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_program_unavailable("node"));

    assert!(!check_runtime(&session, &toolchain()));
    assert!(
        session
            .display_provider
            .has_message("error", "Node.js is not installed")
    );
    assert!(session.process_provider.get_calls_for_command("node").is_empty());
}

#[test]
fn test_unparsable_runtime_version_fails() {
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_runtime_version("garbage"));

    assert!(!check_runtime(&session, &toolchain()));
    assert!(session.display_provider.has_message("error", "garbage"));
}

#[test]
fn test_runtime_query_failure_is_reported() {
    let session = MockCommandSession::new().with_process(MockProcessProvider::new().with_result(
        "node",
        &["--version"],
        Ok(ProcessOutput::captured(1, "", "segfault\n")),
    ));

    assert!(!check_runtime(&session, &toolchain()));
    assert!(
        session
            .display_provider
            .has_message("error", "Failed to check Node.js")
    );
    assert!(session.display_provider.has_message("detail", "segfault"));
}

#[test]
fn test_package_manager_version_reported() {
    let session = MockCommandSession::new();

    assert!(check_package_manager(&session, &toolchain()));
    assert!(
        session
            .display_provider
            .has_message("success", "npm version 10.2.4 found")
    );
}

#[test]
fn test_missing_package_manager_fails() {
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_program_unavailable("npm"));

    assert!(!check_package_manager(&session, &toolchain()));
    assert!(session.display_provider.has_message("error", "npm is not installed"));
}

#[test]
fn test_probe_collects_every_missing_prerequisite() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new()
            .with_runtime_version("v14.21.3")
            .with_program_unavailable("npm"),
    );

    match probe(&session, &toolchain()) {
        Err(StageError::Prerequisites { missing }) => {
            assert_eq!(missing, vec!["Node.js 18+".to_string(), "npm".to_string()]);
        }
        other => panic!("expected prerequisites error, got {:?}", other),
    }
}

#[test]
fn test_probe_only_queries_versions() {
    let session = MockCommandSession::new();

    probe(&session, &toolchain()).unwrap();
    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["node --version", "npm --version"]
    );
}

use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::*;
use crate::platform::PlatformInfo;
use std::path::PathBuf;

fn toolchain() -> Toolchain {
    Toolchain::for_platform(&PlatformInfo {
        os: "linux",
        arch: "x86_64",
    })
}

fn project() -> PathBuf {
    PathBuf::from("/test/project")
}

#[test]
fn test_fresh_install_without_node_modules() {
    let session = MockCommandSession::new();

    let outcome = install_dependencies(&session, &toolchain(), &project()).unwrap();

    assert_eq!(outcome, DependencyOutcome::Installed);
    let calls = session.process_provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command_line(), "npm install");
    assert_eq!(calls[0].working_dir, Some(project()));
}

#[test]
fn test_fresh_install_failure_is_fatal() {
    let session = MockCommandSession::new().with_process(MockProcessProvider::new().with_result(
        "npm",
        &["install"],
        Ok(ProcessOutput::exited(1)),
    ));

    let error = install_dependencies(&session, &toolchain(), &project()).unwrap_err();

    assert!(matches!(error, StageError::Command { .. }));
    assert!(error.to_string().starts_with("Dependency installation failed"));
    assert!(error.runner_error().is_some());
}

#[test]
fn test_existing_node_modules_reconciles_with_ci() {
    let session = MockCommandSession::new().with_filesystem(
        MockFileSystemProvider::new().with_directory(project().join("node_modules")),
    );

    let outcome = install_dependencies(&session, &toolchain(), &project()).unwrap();

    assert_eq!(outcome, DependencyOutcome::Reconciled);
    assert_eq!(session.process_provider.get_command_lines(), vec!["npm ci"]);
}

#[test]
fn test_reconcile_failure_only_warns() {
    let session = MockCommandSession::new()
        .with_filesystem(
            MockFileSystemProvider::new().with_directory(project().join("node_modules")),
        )
        .with_process(MockProcessProvider::new().with_result(
            "npm",
            &["ci"],
            Ok(ProcessOutput::exited(1)),
        ));

    let outcome = install_dependencies(&session, &toolchain(), &project()).unwrap();

    assert_eq!(outcome, DependencyOutcome::ReconcileFailed);
    assert!(session.display_provider.has_message("warning", "continuing"));
    assert_eq!(session.display_provider.count_calls("error"), 0);
}

#[test]
fn test_spawn_failure_during_install_is_fatal() {
    let session = MockCommandSession::new().with_process(MockProcessProvider::new().with_result(
        "npm",
        &["install"],
        Err("No such file or directory".to_string()),
    ));

    let error = install_dependencies(&session, &toolchain(), &project()).unwrap_err();
    assert!(error.to_string().contains("No such file or directory"));
}

use super::*;
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
fn test_script_invocation_injects_port_and_mode() {
    let invocation = script_invocation(
        &toolchain(),
        &["run", "dev"],
        RunMode::Development,
        3001,
        &project(),
    );

    assert_eq!(invocation.command_line(), "npm run dev");
    assert_eq!(invocation.env_value("PORT"), Some("3001"));
    assert_eq!(invocation.env_value("NODE_ENV"), Some("development"));
    assert_eq!(invocation.working_dir, Some(project()));
}

#[tokio::test]
async fn test_development_runs_dev_script() {
    let session = MockCommandSession::new();

    let completion = launch(&session, &toolchain(), &project(), RunMode::Development, 3000)
        .await
        .unwrap();

    assert_eq!(completion, Completion::ApplicationStopped { code: Some(0) });
    let calls = session.process_provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].supervised);
    assert_eq!(calls[0].command_line(), "npm run dev");
    assert_eq!(calls[0].env_value("PORT"), Some("3000"));
    assert!(
        session
            .display_provider
            .has_message("info", "http://localhost:3000")
    );
}

#[tokio::test]
async fn test_production_builds_then_starts() {
    let session = MockCommandSession::new();

    launch(&session, &toolchain(), &project(), RunMode::Production, 8080)
        .await
        .unwrap();

    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["npm run build", "npm start"]
    );
    for call in session.process_provider.get_calls() {
        assert_eq!(call.env_value("NODE_ENV"), Some("production"));
        assert_eq!(call.env_value("PORT"), Some("8080"));
    }
}

#[tokio::test]
async fn test_build_failure_is_fatal_and_skips_start() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_supervised(&["run", "build"], Ok(ChildExit::Exited(Some(2)))),
    );

    let error = launch(&session, &toolchain(), &project(), RunMode::Production, 3000)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::BuildFailed { .. }));
    assert_eq!(
        session.process_provider.get_command_lines(),
        vec!["npm run build"]
    );
}

#[tokio::test]
async fn test_interrupt_is_a_clean_shutdown() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_supervised(&["run", "dev"], Ok(ChildExit::Interrupted)),
    );

    let completion = launch(&session, &toolchain(), &project(), RunMode::Development, 3000)
        .await
        .unwrap();

    assert_eq!(completion, Completion::Interrupted);
    assert!(session.display_provider.has_message("info", "Received stop signal"));
    assert!(session.display_provider.has_message("info", "Shutting down"));
    assert_eq!(session.display_provider.count_calls("error"), 0);
}

#[tokio::test]
async fn test_interrupt_during_build_skips_start() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_supervised(&["run", "build"], Ok(ChildExit::Interrupted)),
    );

    let completion = launch(&session, &toolchain(), &project(), RunMode::Production, 3000)
        .await
        .unwrap();

    assert_eq!(completion, Completion::Interrupted);
    assert_eq!(session.process_provider.get_calls().len(), 1);
}

#[tokio::test]
async fn test_nonzero_application_exit_warns() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_supervised(&["run", "dev"], Ok(ChildExit::Exited(Some(1)))),
    );

    let completion = launch(&session, &toolchain(), &project(), RunMode::Development, 3000)
        .await
        .unwrap();

    assert_eq!(completion, Completion::ApplicationStopped { code: Some(1) });
    assert!(
        session
            .display_provider
            .has_message("warning", "Application exited with code 1")
    );
}

#[tokio::test]
async fn test_spawn_failure_is_launch_failure() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new()
            .with_supervised(&["run", "dev"], Err("No such file or directory".to_string())),
    );

    let error = launch(&session, &toolchain(), &project(), RunMode::Development, 3000)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::LaunchFailed { ref command, .. } if command == "npm run dev"));
}

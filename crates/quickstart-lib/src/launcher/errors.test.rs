use super::*;

fn failed_install() -> RunnerError {
    RunnerError::CommandFailed {
        command: "npm install".to_string(),
        code: Some(1),
        stdout: None,
        stderr: Some("ERESOLVE\n".to_string()),
    }
}

#[test]
fn test_command_error_message_names_action_and_command() {
    let error = StageError::command("Dependency installation", failed_install());
    let message = error.to_string();

    assert!(message.starts_with("Dependency installation failed"));
    assert!(message.contains("npm install"));
    assert!(message.contains("code 1"));
}

#[test]
fn test_runner_error_is_exposed_for_reporting() {
    let error = StageError::BuildFailed {
        source: failed_install(),
    };
    assert!(error.runner_error().is_some());
    assert!(StageError::Cancelled.runner_error().is_none());
}

#[test]
fn test_prerequisites_lists_missing_tools() {
    let error = StageError::Prerequisites {
        missing: vec!["node".to_string(), "npm".to_string()],
    };
    assert_eq!(error.to_string(), "Missing prerequisites: node, npm");
}

#[test]
fn test_cancellation_classification() {
    assert!(StageError::Cancelled.is_cancellation());
    assert!(
        StageError::InvalidPort {
            input: "abc".to_string()
        }
        .is_cancellation()
    );
    assert!(!StageError::command("Database setup", failed_install()).is_cancellation());
}

#[test]
fn test_filesystem_error_includes_path() {
    let error = StageError::filesystem(
        "write",
        PathBuf::from("/p/.env"),
        &anyhow::anyhow!("Read-only filesystem"),
    );
    let message = error.to_string();
    assert!(message.contains("/p/.env"));
    assert!(message.contains("Read-only filesystem"));
}

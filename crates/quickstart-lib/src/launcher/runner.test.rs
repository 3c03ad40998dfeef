use super::*;
use crate::application::session_mocks::MockProcessProvider;
use crate::display::{DisplayCall, DisplayProvider, MockDisplayProvider};

#[test]
fn test_invocation_builder() {
    let invocation = Invocation::new("npm")
        .args(["run", "dev"])
        .env("PORT", "3000")
        .env("PORT", "4000")
        .current_dir(Path::new("/srv/app"));

    assert_eq!(invocation.command_line(), "npm run dev");
    assert_eq!(invocation.to_string(), "npm run dev");
    assert!(invocation.check);
    assert!(!invocation.capture_output);
    assert_eq!(invocation.env_value("PORT"), Some("4000"));
    assert_eq!(invocation.env_value("NODE_ENV"), None);
    assert_eq!(invocation.working_dir, Some(PathBuf::from("/srv/app")));
}

#[test]
fn test_run_returns_captured_output() {
    let process = MockProcessProvider::new();
    let output = run(&process, &Invocation::new("node").arg("--version").capture()).unwrap();

    assert!(output.success());
    assert_eq!(output.stdout.as_deref(), Some("v20.11.1\n"));
}

#[test]
fn test_checked_failure_carries_streams() {
    let process = MockProcessProvider::new().with_result(
        "npm",
        &["install"],
        Ok(ProcessOutput::captured(1, "partial\n", "ERESOLVE\n")),
    );

    let err = run(&process, &Invocation::new("npm").arg("install")).unwrap_err();
    match &err {
        RunnerError::CommandFailed {
            command,
            code,
            stderr,
            ..
        } => {
            assert_eq!(command, "npm install");
            assert_eq!(*code, Some(1));
            assert_eq!(stderr.as_deref(), Some("ERESOLVE\n"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "command `npm install` exited with code 1");
}

#[test]
fn test_unchecked_failure_is_returned() {
    let process =
        MockProcessProvider::new().with_result("lsof", &["-i:3000"], Ok(ProcessOutput::exited(1)));

    let output = run(&process, &Invocation::new("lsof").arg("-i:3000").unchecked()).unwrap();
    assert!(!output.success());
    assert_eq!(output.code, Some(1));
}

#[test]
fn test_spawn_failure() {
    let process = MockProcessProvider::new().with_result(
        "npm",
        &["ci"],
        Err("No such file or directory".to_string()),
    );

    let err = run(&process, &Invocation::new("npm").arg("ci")).unwrap_err();
    assert!(matches!(err, RunnerError::Spawn { .. }));
    assert!(err.to_string().contains("No such file or directory"));
}

#[test]
fn test_report_shows_only_non_empty_streams() {
    let display = MockDisplayProvider::new();
    let err = RunnerError::CommandFailed {
        command: "npx prisma db push".to_string(),
        code: Some(1),
        stdout: Some("   \n".to_string()),
        stderr: Some("P1012 schema error\n".to_string()),
    };

    err.report(display.status().as_ref());

    assert_eq!(
        display.get_calls(),
        vec![
            DisplayCall::Message {
                text: "Stderr:".to_string()
            },
            DisplayCall::Detail {
                text: "P1012 schema error\n".to_string()
            },
        ]
    );
}

#[test]
fn test_signal_termination_message() {
    let err = RunnerError::CommandFailed {
        command: "npm run build".to_string(),
        code: None,
        stdout: None,
        stderr: None,
    };
    assert!(err.to_string().contains("terminated by signal"));
}

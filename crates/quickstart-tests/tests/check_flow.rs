//! E2E tests for `--check`
//!
//! Mock `node`/`npm` executables on a private PATH stand in for the real
//! toolchain; the launcher only queries their versions.

#![cfg(unix)]

use anyhow::Result;
use quickstart_lib::application::RunConfiguration;
use quickstart_lib::application::commands::execute_command_with_session;
use quickstart_lib::{Completion, StageError};
use quickstart_tests::{HermeticSessionBuilder, MockBehavior};

fn check_only() -> RunConfiguration {
    RunConfiguration {
        check_only: true,
        ..RunConfiguration::default()
    }
}

#[tokio::test]
async fn e2e_check_passes_with_supported_toolchain() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .build();

    let completion = execute_command_with_session(&check_only(), &session).await?;

    assert_eq!(completion, Completion::ChecksPassed);
    assert_eq!(env.get_all_calls()?, vec!["node --version", "npm --version"]);
    assert!(!env.project_path(".env").exists());
    Ok(())
}

#[tokio::test]
async fn e2e_check_rejects_old_runtime() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v16.20.2")?
        .build();

    let error = execute_command_with_session(&check_only(), &session)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::Prerequisites { .. }));
    assert!(!env.verify_mock_call("npm", &["install"])?);
    Ok(())
}

#[tokio::test]
async fn e2e_full_run_stops_after_failed_check() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v17.9.1")?
        .build();

    let result = execute_command_with_session(&RunConfiguration::default(), &session).await;

    assert!(result.is_err());
    assert!(env.get_mock_calls("npx")?.is_empty());
    assert!(!env.project_path(".env").exists());
    Ok(())
}

#[tokio::test]
async fn e2e_check_fails_without_runtime() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_mock_executable("npm", MockBehavior::output("10.2.4"))?
        .build();

    let error = execute_command_with_session(&check_only(), &session)
        .await
        .unwrap_err();

    match error {
        StageError::Prerequisites { missing } => assert_eq!(missing, vec!["Node.js 18+"]),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(env.get_mock_calls("npm")?, vec!["--version"]);
    Ok(())
}

#[tokio::test]
async fn e2e_check_fails_when_version_query_fails() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_mock_executable("node", MockBehavior::fail("node: cannot execute"))?
        .build();

    let result = execute_command_with_session(&check_only(), &session).await;

    assert!(matches!(result, Err(StageError::Prerequisites { .. })));
    Ok(())
}

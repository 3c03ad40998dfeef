//! E2E tests for port negotiation and application launch

#![cfg(unix)]

use anyhow::Result;
use quickstart_lib::application::RunConfiguration;
use quickstart_lib::application::commands::execute_command_with_session;
use quickstart_lib::application::session_mocks::MockInteractiveProvider;
use quickstart_lib::{Completion, RunMode, StageError};
use quickstart_tests::{ConditionalRule, HermeticSessionBuilder, MockBehavior};

#[tokio::test]
async fn e2e_development_launch_injects_port_and_mode() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .build();

    let completion = execute_command_with_session(&RunConfiguration::default(), &session).await?;

    assert_eq!(completion, Completion::ApplicationStopped { code: Some(0) });
    assert_eq!(
        env.get_all_calls()?.last().map(String::as_str),
        Some("npm run dev")
    );
    assert_eq!(
        env.read_project_file("launch.env")?.trim(),
        "PORT=3000 NODE_ENV=development"
    );
    Ok(())
}

#[tokio::test]
async fn e2e_production_launch_builds_first() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .build();
    let run = RunConfiguration {
        mode: RunMode::Production,
        port: 8080,
        ..RunConfiguration::default()
    };

    execute_command_with_session(&run, &session).await?;

    let calls = env.get_all_calls()?;
    assert_eq!(&calls[calls.len() - 2..], ["npm run build", "npm start"]);
    assert_eq!(
        env.read_project_file("launch.env")?.trim(),
        "PORT=8080 NODE_ENV=production"
    );
    Ok(())
}

#[tokio::test]
async fn e2e_failed_build_is_fatal() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_mock_executable(
            "npm",
            MockBehavior::Conditional {
                rules: vec![
                    ConditionalRule::new(&["--version"], MockBehavior::output("10.2.4")),
                    ConditionalRule::new(&["run", "build"], MockBehavior::fail("Type error")),
                ],
            },
        )?
        .build();
    let run = RunConfiguration {
        mode: RunMode::Production,
        ..RunConfiguration::default()
    };

    let error = execute_command_with_session(&run, &session)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::BuildFailed { .. }));
    assert!(!env.verify_mock_call("npm", &["start"])?);
    Ok(())
}

#[tokio::test]
async fn e2e_application_crash_still_completes() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_mock_executable(
            "npm",
            MockBehavior::Conditional {
                rules: vec![
                    ConditionalRule::new(&["--version"], MockBehavior::output("10.2.4")),
                    ConditionalRule::new(&["run", "dev"], MockBehavior::script("exit 7")),
                ],
            },
        )?
        .build();

    let completion = execute_command_with_session(&RunConfiguration::default(), &session).await?;

    assert_eq!(completion, Completion::ApplicationStopped { code: Some(7) });
    Ok(())
}

#[tokio::test]
async fn e2e_declined_port_retry_cancels_before_launch() -> Result<()> {
    let interactive = MockInteractiveProvider::new().with_confirm(false);
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_occupied_port(3000)
        .with_interactive(interactive.clone())
        .build();

    let error = execute_command_with_session(&RunConfiguration::default(), &session)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::Cancelled));
    assert!(!env.verify_mock_call("npm", &["run", "dev"])?);
    assert_eq!(interactive.get_confirm_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_operator_chosen_port_reaches_application() -> Result<()> {
    let interactive = MockInteractiveProvider::new()
        .with_confirm(true)
        .with_text_input("4321");
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_occupied_port(3000)
        .with_interactive(interactive)
        .build();

    execute_command_with_session(&RunConfiguration::default(), &session).await?;

    let recorded = env.read_project_file("launch.env")?;
    assert_eq!(recorded.trim(), "PORT=4321 NODE_ENV=development");
    assert!(!recorded.contains("PORT=3000"));
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_port_input_cancels() -> Result<()> {
    let interactive = MockInteractiveProvider::new()
        .with_confirm(true)
        .with_text_input("not-a-port");
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_occupied_port(3000)
        .with_interactive(interactive)
        .build();

    let error = execute_command_with_session(&RunConfiguration::default(), &session)
        .await
        .unwrap_err();

    assert!(error.is_cancellation());
    assert!(!env.project_path("launch.env").exists());
    Ok(())
}

//! E2E tests for provisioning: `.env`, dependencies and database

#![cfg(unix)]

use anyhow::Result;
use quickstart_lib::application::RunConfiguration;
use quickstart_lib::application::commands::execute_command_with_session;
use quickstart_lib::launcher::envfile::DEFAULT_ENV_TEMPLATE;
use quickstart_lib::{Completion, StageError};
use quickstart_tests::{ConditionalRule, HermeticSessionBuilder, MockBehavior};

fn setup_only() -> RunConfiguration {
    RunConfiguration {
        setup_only: true,
        ..RunConfiguration::default()
    }
}

#[tokio::test]
async fn e2e_setup_provisions_fresh_project() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .build();

    let completion = execute_command_with_session(&setup_only(), &session).await?;

    assert_eq!(completion, Completion::SetupComplete);
    assert_eq!(
        env.get_all_calls()?,
        vec![
            "node --version",
            "npm --version",
            "npm install",
            "npx prisma generate",
            "npx prisma db push",
            "npx prisma db seed",
        ]
    );

    let written = env.read_project_file(".env")?;
    assert_eq!(written, DEFAULT_ENV_TEMPLATE);
    assert!(written.contains("PORT=3000"));
    assert!(written.contains("NODE_ENV=\"development\""));
    assert!(env.project_path("prisma/dev.db").exists());
    assert!(!env.project_path("launch.env").exists());
    Ok(())
}

#[tokio::test]
async fn e2e_setup_preserves_existing_env_file() -> Result<()> {
    let original = "# mine\nDATABASE_URL=\"file:./dev.db\"\nNEXTAUTH_SECRET=\"keep\"\nPORT=4000\n";
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_project_file(".env", original)?
        .build();

    execute_command_with_session(&setup_only(), &session).await?;

    assert_eq!(env.read_project_file(".env")?, original);
    Ok(())
}

#[tokio::test]
async fn e2e_setup_migrates_existing_database_without_seeding() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_project_file("prisma/dev.db", "")?
        .build();

    execute_command_with_session(&setup_only(), &session).await?;

    assert!(env.verify_mock_call("npx", &["prisma", "db", "push"])?);
    assert!(!env.verify_mock_call("npx", &["prisma", "db", "seed"])?);
    Ok(())
}

#[tokio::test]
async fn e2e_force_seed_recreates_database() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_project_file("prisma/dev.db", "old data")?
        .build();
    let run = RunConfiguration {
        force_seed: true,
        ..setup_only()
    };

    execute_command_with_session(&run, &session).await?;

    assert!(env.verify_mock_call("npx", &["prisma", "db", "seed"])?);
    assert_eq!(env.read_project_file("prisma/dev.db")?, "");
    Ok(())
}

#[tokio::test]
async fn e2e_existing_dependencies_are_reconciled() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_project_dir("node_modules")?
        .build();

    execute_command_with_session(&setup_only(), &session).await?;

    assert!(env.verify_mock_call("npm", &["ci"])?);
    assert!(!env.verify_mock_call("npm", &["install"])?);
    Ok(())
}

#[tokio::test]
async fn e2e_reconcile_failure_does_not_block_setup() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_mock_executable(
            "npm",
            MockBehavior::Conditional {
                rules: vec![
                    ConditionalRule::new(&["--version"], MockBehavior::output("10.2.4")),
                    ConditionalRule::new(&["ci"], MockBehavior::fail("npm ERR! lockfile out of sync")),
                ],
            },
        )?
        .with_project_dir("node_modules")?
        .build();

    let completion = execute_command_with_session(&setup_only(), &session).await?;

    assert_eq!(completion, Completion::SetupComplete);
    assert!(env.verify_mock_call("npx", &["prisma", "generate"])?);
    Ok(())
}

#[tokio::test]
async fn e2e_install_failure_aborts_before_database() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .with_mock_executable(
            "npm",
            MockBehavior::Conditional {
                rules: vec![
                    ConditionalRule::new(&["--version"], MockBehavior::output("10.2.4")),
                    ConditionalRule::new(&["install"], MockBehavior::fail("npm ERR! ERESOLVE")),
                ],
            },
        )?
        .build();

    let error = execute_command_with_session(&setup_only(), &session)
        .await
        .unwrap_err();

    assert!(matches!(error, StageError::Command { .. }));
    assert!(env.get_mock_calls("npx")?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_skip_deps_goes_straight_to_database() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_toolchain("v20.11.1")?
        .build();
    let run = RunConfiguration {
        skip_deps: true,
        ..setup_only()
    };

    execute_command_with_session(&run, &session).await?;

    assert_eq!(env.get_mock_calls("npm")?, vec!["--version"]);
    assert!(env.verify_mock_call("npx", &["prisma", "generate"])?);
    Ok(())
}

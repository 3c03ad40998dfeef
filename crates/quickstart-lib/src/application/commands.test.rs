use super::*;
use crate::application::session::ChildExit;
use crate::application::session_mocks::*;
use crate::display::DisplayCall;
use crate::launcher::envfile::DEFAULT_ENV_TEMPLATE;
use crate::primitives::RunMode;
use std::path::PathBuf;

fn project() -> PathBuf {
    PathBuf::from("/test/project")
}

fn run_config() -> RunConfiguration {
    RunConfiguration {
        port: 3000,
        ..RunConfiguration::default()
    }
}

fn supervised_lines(session: &MockCommandSession) -> Vec<String> {
    session
        .process_provider
        .get_calls()
        .iter()
        .filter(|call| call.supervised)
        .map(|call| call.command_line().replacen(".cmd", "", 1))
        .collect()
}

mod check_tests {
    use super::*;

    #[tokio::test]
    async fn it_only_runs_prerequisite_checks() {
        let session = MockCommandSession::new();
        let run = RunConfiguration {
            check_only: true,
            force_seed: true,
            mode: RunMode::Production,
            ..run_config()
        };

        let completion = execute_command_with_session(&run, &session).await.unwrap();

        assert_eq!(completion, Completion::ChecksPassed);
        assert_eq!(
            session.process_provider.get_command_lines(),
            vec!["node --version", "npm --version"]
        );
        assert!(session.filesystem_provider.file_content(&project().join(".env")).is_none());
        assert!(session.display_provider.has_message("success", "All checks passed!"));
    }

    #[tokio::test]
    async fn it_fails_on_outdated_runtime_without_installing() {
        let session = MockCommandSession::new()
            .with_process(MockProcessProvider::new().with_runtime_version("v16.20.2"));

        let error = execute_command_with_session(&run_config(), &session)
            .await
            .unwrap_err();

        assert!(matches!(error, StageError::Prerequisites { .. }));
        assert!(
            !session
                .process_provider
                .get_command_lines()
                .iter()
                .any(|line| line.starts_with("npm install"))
        );
        assert!(session.display_provider.has_message("error", "Missing prerequisites"));
    }

    #[tokio::test]
    async fn it_prints_banner_and_run_summary() {
        let session = MockCommandSession::new();
        let run = RunConfiguration {
            check_only: true,
            port: 8080,
            mode: RunMode::Production,
            ..run_config()
        };

        execute_command_with_session(&run, &session).await.unwrap();

        let calls = session.display_provider.get_calls();
        assert_eq!(
            calls[0],
            DisplayCall::Banner {
                title: APP_TITLE.to_string()
            }
        );
        assert!(session.display_provider.has_message("info", "Platform: "));
        assert!(session.display_provider.has_message("info", "Mode: prod, Port: 8080"));
        assert!(
            session
                .display_provider
                .has_message("header", "Checking prerequisites")
        );
    }
}

mod setup_tests {
    use super::*;

    #[tokio::test]
    async fn it_provisions_without_launching() {
        let session = MockCommandSession::new();
        let run = RunConfiguration {
            setup_only: true,
            ..run_config()
        };

        let completion = execute_command_with_session(&run, &session).await.unwrap();

        assert_eq!(completion, Completion::SetupComplete);
        assert_eq!(
            session.process_provider.get_command_lines(),
            vec![
                "node --version",
                "npm --version",
                "npm install",
                "npx prisma generate",
                "npx prisma db push",
                "npx prisma db seed",
            ]
        );
        assert!(session.network_provider.get_probed_ports().is_empty());
        assert!(supervised_lines(&session).is_empty());
        assert_eq!(
            session
                .filesystem_provider
                .file_content(&project().join(".env"))
                .as_deref(),
            Some(DEFAULT_ENV_TEMPLATE)
        );
        assert!(session.display_provider.has_message("success", "Setup complete!"));
    }

    #[tokio::test]
    async fn it_skips_dependency_install() {
        let session = MockCommandSession::new();
        let run = RunConfiguration {
            setup_only: true,
            skip_deps: true,
            ..run_config()
        };

        execute_command_with_session(&run, &session).await.unwrap();

        assert!(session.process_provider.get_calls_for_command("npm").iter().all(|call| call.args == ["--version"]));
        assert!(
            session
                .display_provider
                .has_message("info", "Skipping dependency installation")
        );
    }

    #[tokio::test]
    async fn it_keeps_existing_env_file_and_database() {
        let env = "DATABASE_URL=\"file:./data.db\"\nNEXTAUTH_SECRET=\"abc\"\n";
        let session = MockCommandSession::new().with_filesystem(
            MockFileSystemProvider::new()
                .with_file(project().join(".env"), env)
                .with_file(project().join("prisma/data.db"), "sqlite")
                .with_directory(project().join("node_modules")),
        );
        let run = RunConfiguration {
            setup_only: true,
            ..run_config()
        };

        execute_command_with_session(&run, &session).await.unwrap();

        assert_eq!(
            session
                .filesystem_provider
                .file_content(&project().join(".env"))
                .as_deref(),
            Some(env)
        );
        let lines = session.process_provider.get_command_lines();
        assert!(lines.contains(&"npm ci".to_string()));
        assert!(!lines.contains(&"npx prisma db seed".to_string()));
    }

    #[tokio::test]
    async fn it_stops_when_database_setup_fails() {
        let session = MockCommandSession::new().with_process(
            MockProcessProvider::new().with_runner_result(
                &["prisma", "db", "push"],
                Ok(crate::application::session::ProcessOutput::exited(1)),
            ),
        );

        let error = execute_command_with_session(&run_config(), &session)
            .await
            .unwrap_err();

        assert!(matches!(error, StageError::Command { .. }));
        assert!(session.network_provider.get_probed_ports().is_empty());
        assert_eq!(session.display_provider.count_calls("error"), 1);
    }
}

mod launch_tests {
    use super::*;

    #[tokio::test]
    async fn it_launches_development_server() {
        let session = MockCommandSession::new();

        let completion = execute_command_with_session(&run_config(), &session)
            .await
            .unwrap();

        assert_eq!(completion, Completion::ApplicationStopped { code: Some(0) });
        assert_eq!(supervised_lines(&session), vec!["npm run dev"]);
        assert_eq!(session.network_provider.get_probed_ports(), vec![3000]);
        assert!(
            session
                .display_provider
                .has_message("header", "Checking port availability")
        );
    }

    #[tokio::test]
    async fn it_launches_production_server() {
        let session = MockCommandSession::new();
        let run = RunConfiguration {
            mode: RunMode::Production,
            ..run_config()
        };

        execute_command_with_session(&run, &session).await.unwrap();

        assert_eq!(supervised_lines(&session), vec!["npm run build", "npm start"]);
    }

    #[tokio::test]
    async fn it_cancels_when_operator_declines_new_port() {
        let session = MockCommandSession::new()
            .with_network(MockNetworkProvider::new().with_occupied_port(3000))
            .with_interactive(MockInteractiveProvider::new().with_confirm(false));

        let error = execute_command_with_session(&run_config(), &session)
            .await
            .unwrap_err();

        assert!(matches!(error, StageError::Cancelled));
        assert!(supervised_lines(&session).is_empty());
        assert!(session.display_provider.has_message("error", "Cancelled by user"));
    }

    #[tokio::test]
    async fn it_launches_on_operator_chosen_port() {
        let session = MockCommandSession::new()
            .with_network(MockNetworkProvider::new().with_occupied_port(3000))
            .with_interactive(
                MockInteractiveProvider::new()
                    .with_confirm(true)
                    .with_text_input("3005"),
            );

        execute_command_with_session(&run_config(), &session)
            .await
            .unwrap();

        let launched: Vec<_> = session
            .process_provider
            .get_calls()
            .into_iter()
            .filter(|call| call.supervised)
            .collect();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].env_value("PORT"), Some("3005"));
        assert!(session.display_provider.has_message("info", "http://localhost:3005"));
        assert!(!session.display_provider.has_message("info", "http://localhost:3000"));
    }

    #[tokio::test]
    async fn it_treats_interrupt_as_success() {
        let session = MockCommandSession::new().with_process(
            MockProcessProvider::new().with_supervised(&["run", "dev"], Ok(ChildExit::Interrupted)),
        );

        let completion = execute_command_with_session(&run_config(), &session)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Interrupted);
        assert_eq!(session.display_provider.count_calls("error"), 0);
    }

    #[tokio::test]
    async fn it_reports_build_failure() {
        let session = MockCommandSession::new().with_process(
            MockProcessProvider::new()
                .with_supervised(&["run", "build"], Ok(ChildExit::Exited(Some(1)))),
        );
        let run = RunConfiguration {
            mode: RunMode::Production,
            ..run_config()
        };

        let error = execute_command_with_session(&run, &session).await.unwrap_err();

        assert!(matches!(error, StageError::BuildFailed { .. }));
        assert!(session.display_provider.has_message("error", "Production build failed"));
    }
}

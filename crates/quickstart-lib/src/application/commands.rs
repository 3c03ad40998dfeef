//! Launcher pipeline
//!
//! Prerequisites, environment file, dependencies, database, port, launch.
//! Every stage short-circuits the run on failure; the failure is reported once
//! here as an `[ERROR]` line.

use crate::application::CliConfig;
use crate::application::cli::RunConfiguration;
use crate::application::session::{CommandSession, Session};
use crate::launcher::{
    Completion, StageError, Toolchain, database, deps, envfile, ports, prober, supervisor,
};
use crate::platform::PlatformInfo;
use crate::terminal::TerminalCapabilities;

/// Title shown in the startup banner
pub const APP_TITLE: &str = "360 Feedback System";

/// Run the launcher against the real console, filesystem and processes
pub async fn execute_command(
    config: CliConfig,
    capabilities: &TerminalCapabilities,
) -> Result<Completion, StageError> {
    let session = CommandSession::new(config.app_config, capabilities);
    execute_command_with_session(&config.run, &session).await
}

/// Execute the pipeline with a provided session (for testing)
pub async fn execute_command_with_session(
    run: &RunConfiguration,
    session: &dyn Session,
) -> Result<Completion, StageError> {
    let result = run_pipeline(run, session, &PlatformInfo::detect()).await;

    match &result {
        Ok(completion) => tracing::info!(?completion, "launcher finished"),
        Err(e) => {
            tracing::debug!(error = ?e, "launcher failed");
            report_failure(session, e);
        }
    }

    result
}

fn report_failure(session: &dyn Session, error: &StageError) {
    let status = session.display().status();
    status.error(&error.to_string());
    if let Some(runner_error) = error.runner_error() {
        runner_error.report(status.as_ref());
    }
}

async fn run_pipeline(
    run: &RunConfiguration,
    session: &dyn Session,
    platform: &PlatformInfo,
) -> Result<Completion, StageError> {
    let status = session.display().status();
    let toolchain = Toolchain::for_platform(platform);
    let project_dir = session.config().app_config().project_dir().to_path_buf();
    tracing::debug!(?run, project_dir = %project_dir.display(), "starting launcher");

    status.banner(APP_TITLE);
    status.info(&format!("Platform: {}", platform));
    status.info(&format!("Mode: {}, Port: {}", run.mode, run.port));
    status.blank();

    status.header("Checking prerequisites");
    prober::probe(session, &toolchain)?;

    if run.check_only {
        status.success("All checks passed!");
        return Ok(Completion::ChecksPassed);
    }

    status.header("Setting up environment");
    let env_file = envfile::ensure_env_file(session, &project_dir)?;

    if run.skip_deps {
        status.info("Skipping dependency installation");
    } else {
        deps::install_dependencies(session, &toolchain, &project_dir)?;
    }

    let database = database::database_path(&project_dir, Some(&env_file));
    database::provision_database(session, &toolchain, &project_dir, &database, run.force_seed)?;

    if run.setup_only {
        status.success("Setup complete!");
        return Ok(Completion::SetupComplete);
    }

    status.header("Checking port availability");
    let inspector = ports::platform_inspector(platform);
    let port = ports::negotiate_port(session, inspector.as_ref(), run.port)?;

    supervisor::launch(session, &toolchain, &project_dir, run.mode, port).await
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}

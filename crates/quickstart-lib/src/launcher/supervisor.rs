//! Foreground supervision of the web application
//!
//! The application runs as a single child process with inherited console
//! streams. Interrupt and termination signals received while it runs stop the
//! child and count as a clean shutdown.

use crate::application::session::{ChildExit, Session};
use crate::display::StatusProvider;
use crate::launcher::Completion;
use crate::launcher::errors::StageError;
use crate::launcher::runner::{Invocation, RunnerError, describe_code};
use crate::launcher::toolchain::Toolchain;
use crate::primitives::RunMode;
use std::path::Path;

pub fn application_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// npm invocation for a script with `PORT` and `NODE_ENV` injected
pub fn script_invocation(
    toolchain: &Toolchain,
    args: &[&str],
    mode: RunMode,
    port: u16,
    project_dir: &Path,
) -> Invocation {
    toolchain
        .npm(args.iter().copied())
        .env("PORT", port.to_string())
        .env("NODE_ENV", mode.node_env())
        .current_dir(project_dir)
}

fn announce(status: &dyn StatusProvider, port: u16) {
    status.blank();
    status.success("Setup complete! Launching application...");
    status.info(&format!(
        "The application will be available at {}",
        application_url(port)
    ));
    status.info("Press Ctrl+C to stop");
    status.blank();
}

/// Lines printed when the operator stops the launcher
pub fn stop_notice(status: &dyn StatusProvider) {
    status.blank();
    status.info("Received stop signal...");
    status.info("Shutting down...");
}

async fn supervise(session: &dyn Session, invocation: &Invocation) -> Result<ChildExit, StageError> {
    session
        .process()
        .supervise(invocation)
        .await
        .map_err(|e| StageError::LaunchFailed {
            command: invocation.command_line(),
            reason: format!("{:#}", e),
        })
}

/// Start the server in the foreground and wait for it to stop
pub async fn launch(
    session: &dyn Session,
    toolchain: &Toolchain,
    project_dir: &Path,
    mode: RunMode,
    port: u16,
) -> Result<Completion, StageError> {
    let status = session.display().status();
    announce(status.as_ref(), port);

    if mode == RunMode::Production {
        status.info("Building the application for production...");
        let build = script_invocation(toolchain, &["run", "build"], mode, port, project_dir);
        match supervise(session, &build).await? {
            ChildExit::Interrupted => {
                stop_notice(status.as_ref());
                return Ok(Completion::Interrupted);
            }
            ChildExit::Exited(Some(0)) => {
                tracing::info!("production build finished");
            }
            ChildExit::Exited(code) => {
                return Err(StageError::BuildFailed {
                    source: RunnerError::CommandFailed {
                        command: build.command_line(),
                        code,
                        stdout: None,
                        stderr: None,
                    },
                });
            }
        }
        status.info("Starting in production mode...");
    } else {
        status.info("Starting in development mode...");
    }

    let server_args: &[&str] = match mode {
        RunMode::Development => &["run", "dev"],
        RunMode::Production => &["start"],
    };
    let server = script_invocation(toolchain, server_args, mode, port, project_dir);
    tracing::info!(command = %server, port, mode = %mode, "launching application");

    match supervise(session, &server).await? {
        ChildExit::Interrupted => {
            stop_notice(status.as_ref());
            Ok(Completion::Interrupted)
        }
        ChildExit::Exited(Some(0)) => {
            status.info("Application stopped");
            Ok(Completion::ApplicationStopped { code: Some(0) })
        }
        ChildExit::Exited(code) => {
            status.warning(&format!("Application exited with {}", describe_code(&code)));
            Ok(Completion::ApplicationStopped { code })
        }
    }
}

#[cfg(test)]
mod tests {
    include!("supervisor.test.rs");
}

//! Dependency installation
//!
//! Without `node_modules/` a full `npm install` runs and must succeed. With
//! it, `npm ci` reconciles against the lockfile; a failure there only warns,
//! since the existing install is usually still usable.

use crate::application::session::Session;
use crate::launcher::errors::StageError;
use crate::launcher::runner;
use crate::launcher::toolchain::Toolchain;
use std::path::Path;

pub const DEPENDENCY_DIR: &str = "node_modules";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyOutcome {
    Installed,
    Reconciled,
    /// Reconciliation failed and the existing install was kept
    ReconcileFailed,
}

pub fn install_dependencies(
    session: &dyn Session,
    toolchain: &Toolchain,
    project_dir: &Path,
) -> Result<DependencyOutcome, StageError> {
    let status = session.display().status();
    let has_modules = session
        .filesystem()
        .is_directory(&project_dir.join(DEPENDENCY_DIR));
    tracing::debug!(has_modules, "dependency directory checked");

    if !has_modules {
        status.info("Installing dependencies...");
        let install = toolchain.npm(["install"]).current_dir(project_dir);
        return match runner::run(session.process(), &install) {
            Ok(_) => {
                status.success("Dependencies installed");
                Ok(DependencyOutcome::Installed)
            }
            Err(e) => Err(StageError::command("Dependency installation", e)),
        };
    }

    status.info("Dependencies already installed, checking for updates...");
    let reconcile = toolchain.npm(["ci"]).current_dir(project_dir);
    match runner::run(session.process(), &reconcile) {
        Ok(_) => {
            status.success("Dependencies updated");
            Ok(DependencyOutcome::Reconciled)
        }
        Err(e) => {
            tracing::warn!(error = %e, "dependency reconciliation failed");
            status.warning("Failed to update dependencies, continuing...");
            Ok(DependencyOutcome::ReconcileFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    include!("deps.test.rs");
}

//! Stage failure taxonomy

use crate::launcher::runner::RunnerError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcome of a launcher stage; every variant maps to exit code 1
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Missing prerequisites: {}", missing.join(", "))]
    Prerequisites { missing: Vec<String> },

    #[error("{action} failed: {source}")]
    Command {
        action: String,
        #[source]
        source: RunnerError,
    },

    #[error("Failed to {action} {}: {reason}", path.display())]
    Filesystem {
        action: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Cancelled by user: invalid port {input:?}")]
    InvalidPort { input: String },

    #[error("Production build failed")]
    BuildFailed {
        #[source]
        source: RunnerError,
    },

    #[error("Failed to launch `{command}`: {reason}")]
    LaunchFailed { command: String, reason: String },
}

impl StageError {
    pub fn command(action: impl Into<String>, source: RunnerError) -> Self {
        StageError::Command {
            action: action.into(),
            source,
        }
    }

    pub fn filesystem(action: impl Into<String>, path: PathBuf, error: &anyhow::Error) -> Self {
        StageError::Filesystem {
            action: action.into(),
            path,
            reason: format!("{:#}", error),
        }
    }

    /// Underlying command failure, for showing captured output
    pub fn runner_error(&self) -> Option<&RunnerError> {
        match self {
            StageError::Command { source, .. } | StageError::BuildFailed { source } => Some(source),
            _ => None,
        }
    }

    /// Operator-driven cancellation rather than a tool failure
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            StageError::Cancelled | StageError::InvalidPort { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    include!("errors.test.rs");
}

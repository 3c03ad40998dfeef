//! External command execution
//!
//! An [`Invocation`] describes one call of an external tool. [`run`] executes
//! it through the session's process provider and turns a non-zero exit into
//! [`RunnerError::CommandFailed`] when the invocation asks to be checked.

use crate::application::session::{ProcessOutput, ProcessProvider};
use crate::display::StatusProvider;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One external command call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Fail on non-zero exit
    pub check: bool,
    /// Buffer stdout/stderr instead of inheriting them
    pub capture_output: bool,
    /// Extra environment for the child, on top of the inherited one
    pub env: Vec<(String, String)>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            check: true,
            capture_output: false,
            env: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// Do not treat a non-zero exit as an error
    pub fn unchecked(mut self) -> Self {
        self.check = false;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Value of an injected environment variable
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Command execution errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("command `{command}` exited with {}", describe_code(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    #[error("could not run `{command}`: {reason}")]
    Spawn { command: String, reason: String },
}

pub fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl RunnerError {
    /// Show captured streams of a failed command below the caller's report
    pub fn report(&self, status: &dyn StatusProvider) {
        if let RunnerError::CommandFailed { stdout, stderr, .. } = self {
            for (label, stream) in [("Stdout", stdout), ("Stderr", stderr)] {
                if let Some(text) = stream.as_deref().filter(|t| !t.trim().is_empty()) {
                    status.message(&format!("{}:", label));
                    status.detail(text);
                }
            }
        }
    }
}

/// Execute `invocation`, honouring its `check` flag
pub fn run(
    process: &dyn ProcessProvider,
    invocation: &Invocation,
) -> Result<ProcessOutput, RunnerError> {
    tracing::debug!(command = %invocation, check = invocation.check, capture = invocation.capture_output, "running command");

    let output = process
        .execute(invocation)
        .map_err(|e| RunnerError::Spawn {
            command: invocation.command_line(),
            reason: format!("{:#}", e),
        })?;

    tracing::debug!(command = %invocation, code = ?output.code, "command finished");

    if invocation.check && !output.success() {
        return Err(RunnerError::CommandFailed {
            command: invocation.command_line(),
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    include!("runner.test.rs");
}

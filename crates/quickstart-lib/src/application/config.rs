//! Application configuration management
//!
//! Precedence: defaults -> environment variables -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only diagnostics by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const TTY_CAPS_DETECT_INTENT: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn tty_caps_detect_intent() -> TerminalCapsDetectIntent {
        defaults::TTY_CAPS_DETECT_INTENT
            .parse()
            .unwrap_or(TerminalCapsDetectIntent::Auto)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Project directory holding .env, node_modules and prisma/
    #[arg(short, long, env = "QUICKSTART_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "QUICKSTART_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Diagnostics format (text, json, yaml)
    #[arg(long, env = "QUICKSTART_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Diagnostics stream (stderr, stdout)
    #[arg(long, env = "QUICKSTART_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, env = "QUICKSTART_COLOR", default_value = defaults::TTY_CAPS_DETECT_INTENT)]
    #[serde(default = "default_fns::tty_caps_detect_intent")]
    pub color: TerminalCapsDetectIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::tty_caps_detect_intent(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig and TerminalCapabilities
    pub fn to_logger_config(
        &self,
        terminal_caps: &crate::terminal::TerminalCapabilities,
    ) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            terminal_caps: terminal_caps.clone(),
        }
    }

    /// Project directory; `.` until `validate` has resolved it
    pub fn project_dir(&self) -> &Path {
        self.workdir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve the working directory and make sure it is usable
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let workdir = match self.workdir.take() {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| ConfigError::CurrentDirError { source: e })?,
        };

        if !workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: workdir.display().to_string(),
            });
        }

        self.workdir = Some(workdir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}

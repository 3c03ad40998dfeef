//! # quickstart Library
//!
//! Launcher for the 360 Feedback System web application.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and errors
//! - [`terminal`] - Terminal capability detection
//! - [`display`] - Leveled console reporting
//! - [`logger`] - Structured diagnostics via `tracing`
//! - [`platform`] - Host and program discovery
//! - [`application`] - CLI, configuration, sessions and the pipeline
//! - [`launcher`] - The individual launcher stages
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let code = quickstart_lib::main().await?;
//! # let _ = code;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod display;
pub mod launcher;
pub mod logger;
pub mod platform;
pub mod primitives;
pub mod terminal;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, CliConfig, RunConfiguration, execute_command};
pub use launcher::{Completion, StageError};
pub use logger::Logger;
pub use platform::PlatformInfo;
pub use primitives::{
    ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, RunMode, TerminalCapsDetectIntent,
    TerminalColorCaps,
};
pub use terminal::TerminalCapabilities;

use anyhow::Result;
use application::shutdown;
use display::{DisplayProvider, LiveDisplayProvider, StatusDisplay, StyleManager};
use std::process::ExitCode;

/// Parse arguments, set up terminal and logging, then run the launcher
///
/// Stage failures and operator cancellation are reported by the pipeline and
/// come back as a failure exit code. A stop signal outside child supervision
/// prints the shutdown notice and exits with status 0. An `Err` means
/// something went wrong before the pipeline could start.
pub async fn main() -> Result<ExitCode> {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            use clap::error::ErrorKind;

            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            e.print()?;
            return Ok(code);
        }
    };

    let app_config = AppConfig::load(config.app_config)?;
    let capabilities = TerminalCapabilities::detect_from_config(&app_config)?;

    if let Err(e) = Logger::init(app_config.to_logger_config(&capabilities)) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let notice_display = LiveDisplayProvider::new(&capabilities);
    let _stop_listener = shutdown::spawn_stop_listener(move || {
        launcher::supervisor::stop_notice(notice_display.status().as_ref());
    });

    let config = CliConfig {
        app_config,
        run: config.run,
    };

    match execute_command(config, &capabilities).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Last-resort report for failures outside the pipeline
pub fn report_unexpected(error: &anyhow::Error) {
    let styling = StyleManager::new(&TerminalCapabilities::plain());
    StatusDisplay::new(&styling).error(&format!("Unexpected error: {:#}", error));
}

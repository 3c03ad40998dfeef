use crate::primitives::RunMode;
use clap::{Args, Parser};
use std::ffi::OsString;

use super::config::AppConfig;

/// Default port the application is started on
pub const DEFAULT_PORT: u16 = 3000;

/// quickstart - prepare and launch the 360 feedback web application
#[derive(Debug, Clone, Parser)]
#[command(name = "quickstart")]
#[command(about = "Check prerequisites, provision and launch the 360 Feedback System")]
#[command(version)]
#[command(after_help = "Examples:
  quickstart                 Start in development mode
  quickstart --prod          Start in production mode
  quickstart --port 8080     Start on port 8080
  quickstart --check         Only check prerequisites
  quickstart --setup         Only provision, do not start
  quickstart --force-seed    Recreate the database with sample data")]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// Launch options
    #[command(flatten)]
    pub run: RunFlags,
}

/// Launch flags as typed on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct RunFlags {
    /// Start in development mode (default)
    #[arg(short, long)]
    pub dev: bool,

    /// Build and start in production mode
    #[arg(short, long)]
    pub prod: bool,

    /// Only check prerequisites
    #[arg(short, long)]
    pub check: bool,

    /// Provision the project without starting it
    #[arg(short, long)]
    pub setup: bool,

    /// Port to start the application on
    #[arg(
        long,
        env = "QUICKSTART_PORT",
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Skip dependency installation
    #[arg(long)]
    pub skip_deps: bool,

    /// Recreate the database and load sample data
    #[arg(long)]
    pub force_seed: bool,
}

/// Frozen run configuration threaded through every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfiguration {
    pub mode: RunMode,
    pub port: u16,
    pub skip_deps: bool,
    pub force_seed: bool,
    pub check_only: bool,
    pub setup_only: bool,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        RunFlags {
            port: DEFAULT_PORT,
            ..RunFlags::default()
        }
        .freeze()
    }
}

impl RunFlags {
    /// Resolve the flags into an immutable configuration; `--prod` wins over `--dev`
    pub fn freeze(&self) -> RunConfiguration {
        let mode = if self.prod {
            RunMode::Production
        } else {
            RunMode::Development
        };

        RunConfiguration {
            mode,
            port: self.port,
            skip_deps: self.skip_deps,
            force_seed: self.force_seed,
            check_only: self.check,
            setup_only: self.setup,
        }
    }
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub run: RunConfiguration,
}

impl CliConfig {
    /// Load configuration from the process arguments
    pub fn load() -> Result<Self, clap::Error> {
        Self::load_from(std::env::args_os())
    }

    pub fn load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Ok(Self {
            app_config: cli.config,
            run: cli.run.freeze(),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}

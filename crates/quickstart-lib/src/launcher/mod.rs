//! Launcher stages
//!
//! Each stage owns one step of bringing the web application up: prerequisite
//! probing, `.env` provisioning, dependency install, database provisioning,
//! port negotiation and process supervision. Stages talk to the outside world
//! only through a [`Session`](crate::application::session::Session).

pub mod database;
pub mod deps;
pub mod envfile;
pub mod errors;
pub mod ports;
pub mod prober;
pub mod runner;
pub mod supervisor;
pub mod toolchain;

pub use errors::StageError;
pub use runner::{Invocation, RunnerError};
pub use toolchain::Toolchain;

/// Successful end states of a launcher run, all of which exit 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// `--check`: prerequisites are satisfied
    ChecksPassed,
    /// `--setup`: provisioning finished, nothing launched
    SetupComplete,
    /// The application process ended by itself
    ApplicationStopped { code: Option<i32> },
    /// The operator stopped the application
    Interrupted,
}

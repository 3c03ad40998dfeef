//! Test fixtures shared by unit tests across the crate

pub mod filesystem;

pub use filesystem::TempDirFixture;

/// Held by tests that supervise children or raise signals in this process
pub static PROCESS_SIGNALS: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

//! Terminal display system
//!
//! Leveled, capability-aware status output for the operator. Diagnostics go
//! through `tracing`; everything the operator is meant to read goes through here.

pub mod live;
pub mod mock;
pub mod providers;
pub mod status;
pub mod styling;

#[cfg(test)]
pub mod test_utils;

pub use live::LiveDisplayProvider;
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{DisplayProvider, StatusProvider};
pub use status::StatusDisplay;
pub use styling::StyleManager;

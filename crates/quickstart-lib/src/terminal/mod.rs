//! Terminal capability detection
//!
//! Computed once at startup and handed to the display and logger layers.

pub mod capabilities;

pub use capabilities::*;

//! Shared fixtures for display tests

use crate::primitives::{TerminalColorCaps, TerminalUnicodeCaps};
use crate::terminal::TerminalCapabilities;

/// Capabilities of a redirected, ASCII-only stream
pub fn create_test_capabilities() -> TerminalCapabilities {
    TerminalCapabilities::plain()
}

/// Capabilities of a modern color terminal
pub fn create_color_capabilities() -> TerminalCapabilities {
    TerminalCapabilities {
        color: TerminalColorCaps::Ansi256,
        unicode: TerminalUnicodeCaps::Unicode,
        is_tty: true,
    }
}

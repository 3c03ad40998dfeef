//! Status display for user feedback
//!
//! All operator-facing lines are written to standard output.

use super::styling::StyleManager;
use std::io::{self, Write};

/// Status display bound to a style manager
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Output: `[INFO] Installing dependencies...`
    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    /// Output: `[SUCCESS] Dependencies installed`
    pub fn success(&self, message: &str) {
        println!("{}", self.styling.format_success(message));
    }

    /// Output: `[WARNING] Port 3000 is already in use`
    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    /// Output: `[ERROR] Node.js is not installed`
    pub fn error(&self, message: &str) {
        println!("{}", self.styling.format_error(message));
    }

    pub fn header(&self, message: &str) {
        println!("{}", self.styling.format_header(message));
    }

    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn blank(&self) {
        println!();
    }

    /// Each non-empty line of `text`, indented by two spaces
    pub fn detail(&self, text: &str) {
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            println!("  {}", line);
        }
        io::stdout().flush().unwrap_or(());
    }

    pub fn banner(&self, title: &str) {
        for line in self.styling.format_banner(title) {
            println!("{}", line);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}

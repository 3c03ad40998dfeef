//! Level tags and palette derived once from terminal capabilities
//!
//! The manager is an immutable value: color is decided at construction and
//! never toggled afterwards.

use crate::terminal::TerminalCapabilities;
use crate::primitives::TerminalUnicodeCaps;
use console::Style;

pub const TAG_INFO: &str = "[INFO]";
pub const TAG_SUCCESS: &str = "[SUCCESS]";
pub const TAG_WARNING: &str = "[WARNING]";
pub const TAG_ERROR: &str = "[ERROR]";
pub const TAG_HEADER: &str = "[HEADER]";

const BANNER_WIDTH: usize = 60;

/// Style manager owned by the live display provider
#[derive(Debug, Clone)]
pub struct StyleManager {
    color: bool,
    unicode: bool,
    info: Style,
    success: Style,
    warning: Style,
    error: Style,
    header: Style,
    frame: Style,
    title: Style,
}

impl StyleManager {
    pub fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            color: capabilities.color.is_enabled(),
            unicode: capabilities.unicode == TerminalUnicodeCaps::Unicode,
            info: Style::new().blue().force_styling(true),
            success: Style::new().green().force_styling(true),
            warning: Style::new().yellow().force_styling(true),
            error: Style::new().red().force_styling(true),
            header: Style::new().magenta().force_styling(true),
            frame: Style::new().cyan().force_styling(true),
            title: Style::new().white().bold().force_styling(true),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn style_info(&self, text: &str) -> String {
        self.paint(&self.info, text)
    }

    pub fn style_success(&self, text: &str) -> String {
        self.paint(&self.success, text)
    }

    pub fn style_warning(&self, text: &str) -> String {
        self.paint(&self.warning, text)
    }

    pub fn style_error(&self, text: &str) -> String {
        self.paint(&self.error, text)
    }

    pub fn style_header(&self, text: &str) -> String {
        self.paint(&self.header, text)
    }

    /// `[INFO] message`, with only the tag colored
    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(TAG_INFO), message)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(TAG_SUCCESS), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(TAG_WARNING), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(TAG_ERROR), message)
    }

    pub fn format_header(&self, message: &str) -> String {
        format!("{} {}", self.style_header(TAG_HEADER), message)
    }

    /// Three banner lines: frame, title, frame
    pub fn format_banner(&self, title: &str) -> [String; 3] {
        let rule = "=".repeat(BANNER_WIDTH);
        let title = if self.unicode {
            format!("\u{1F680} {}", title)
        } else {
            title.to_string()
        };

        [
            self.paint(&self.frame, &rule),
            self.paint(&self.title, &title),
            self.paint(&self.frame, &rule),
        ]
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}

//! Live display provider implementation

use super::providers::*;
use super::status::StatusDisplay;
use super::styling::StyleManager;
use crate::terminal::TerminalCapabilities;
use std::sync::Arc;

/// Live implementation of DisplayProvider that owns the palette for the session
#[derive(Clone)]
pub struct LiveDisplayProvider {
    styling: Arc<StyleManager>,
}

impl LiveDisplayProvider {
    pub fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            styling: Arc::new(StyleManager::new(capabilities)),
        }
    }

    pub fn styling(&self) -> &StyleManager {
        &self.styling
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(LiveStatusProvider {
            styling: self.styling.clone(),
        })
    }
}

/// Live implementation of StatusProvider
struct LiveStatusProvider {
    styling: Arc<StyleManager>,
}

impl LiveStatusProvider {
    fn display(&self) -> StatusDisplay<'_> {
        StatusDisplay::new(&self.styling)
    }
}

impl StatusProvider for LiveStatusProvider {
    fn info(&self, message: &str) {
        self.display().info(message);
    }

    fn success(&self, message: &str) {
        self.display().success(message);
    }

    fn warning(&self, message: &str) {
        self.display().warning(message);
    }

    fn error(&self, message: &str) {
        self.display().error(message);
    }

    fn header(&self, message: &str) {
        self.display().header(message);
    }

    fn message(&self, text: &str) {
        self.display().message(text);
    }

    fn blank(&self) {
        self.display().blank();
    }

    fn detail(&self, text: &str) {
        self.display().detail(text);
    }

    fn banner(&self, title: &str) {
        self.display().banner(title);
    }
}

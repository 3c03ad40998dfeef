//! Mock display provider implementation for testing
//!
//! Records every status call so tests can assert on what the operator saw.

use super::providers::*;
use std::sync::{Arc, Mutex};

/// Mock implementation of DisplayProvider that records all calls
#[derive(Clone, Default)]
pub struct MockDisplayProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded display calls for testing assertions
    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// True if any recorded message of the given kind contains `needle`
    pub fn has_message(&self, call_type: &str, needle: &str) -> bool {
        self.get_calls()
            .iter()
            .any(|call| call.call_type() == call_type && call.text().contains(needle))
    }

    pub fn count_calls(&self, call_type: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.call_type() == call_type)
            .count()
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(MockStatusProvider {
            calls: self.calls.clone(),
        })
    }
}

/// Recorded display call for testing
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Info { message: String },
    Success { message: String },
    Warning { message: String },
    Error { message: String },
    Header { message: String },
    Message { text: String },
    Blank,
    Detail { text: String },
    Banner { title: String },
}

impl DisplayCall {
    pub fn call_type(&self) -> &'static str {
        match self {
            DisplayCall::Info { .. } => "info",
            DisplayCall::Success { .. } => "success",
            DisplayCall::Warning { .. } => "warning",
            DisplayCall::Error { .. } => "error",
            DisplayCall::Header { .. } => "header",
            DisplayCall::Message { .. } => "message",
            DisplayCall::Blank => "blank",
            DisplayCall::Detail { .. } => "detail",
            DisplayCall::Banner { .. } => "banner",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DisplayCall::Info { message }
            | DisplayCall::Success { message }
            | DisplayCall::Warning { message }
            | DisplayCall::Error { message }
            | DisplayCall::Header { message } => message,
            DisplayCall::Message { text } | DisplayCall::Detail { text } => text,
            DisplayCall::Banner { title } => title,
            DisplayCall::Blank => "",
        }
    }
}

struct MockStatusProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockStatusProvider {
    fn record(&self, call: DisplayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StatusProvider for MockStatusProvider {
    fn info(&self, message: &str) {
        self.record(DisplayCall::Info {
            message: message.to_string(),
        });
    }

    fn success(&self, message: &str) {
        self.record(DisplayCall::Success {
            message: message.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.record(DisplayCall::Warning {
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.record(DisplayCall::Error {
            message: message.to_string(),
        });
    }

    fn header(&self, message: &str) {
        self.record(DisplayCall::Header {
            message: message.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.record(DisplayCall::Message {
            text: text.to_string(),
        });
    }

    fn blank(&self) {
        self.record(DisplayCall::Blank);
    }

    fn detail(&self, text: &str) {
        self.record(DisplayCall::Detail {
            text: text.to_string(),
        });
    }

    fn banner(&self, title: &str) {
        self.record(DisplayCall::Banner {
            title: title.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let display = MockDisplayProvider::new();
        display.status().header("Checking prerequisites");
        display.status().success("Node.js 20.11.1 found");
        display.status().blank();

        assert_eq!(
            display.get_calls(),
            vec![
                DisplayCall::Header {
                    message: "Checking prerequisites".to_string()
                },
                DisplayCall::Success {
                    message: "Node.js 20.11.1 found".to_string()
                },
                DisplayCall::Blank,
            ]
        );
        assert!(display.has_message("success", "20.11.1"));
        assert_eq!(display.count_calls("blank"), 1);
    }
}

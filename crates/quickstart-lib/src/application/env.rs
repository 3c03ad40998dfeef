//! Environment variable handling for application configuration
//!
//! Standard color and CI conventions.

use crate::primitives::{ConfigError, TerminalCapsDetectIntent};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR environment variable (any non-empty value = disable color)
    pub no_color: Option<String>,
    /// FORCE_COLOR environment variable (0/false = disable, 1/2/3/true = enable)
    pub force_color: Option<String>,
    /// CLICOLOR environment variable (0 = disable color)
    pub clicolor: Option<String>,
    /// CI environment variable (any value = CI mode)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Load environment configuration from current environment
    pub fn load() -> Result<Self, ConfigError> {
        envy::from_env().map_err(|e| ConfigError::EnvironmentParsingFailed { source: e })
    }

    /// Apply environment variables to color configuration
    ///
    /// Only an `auto` intent is adjusted; an explicit `--color` always wins.
    /// Precedence among the variables: CI < CLICOLOR < NO_COLOR < FORCE_COLOR
    pub fn apply_color_config(&self, color: TerminalCapsDetectIntent) -> TerminalCapsDetectIntent {
        if color != TerminalCapsDetectIntent::Auto {
            return color;
        }

        let mut color = color;

        if self.ci.is_some() {
            color = TerminalCapsDetectIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = TerminalCapsDetectIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
            color = TerminalCapsDetectIntent::Never;
        }

        if let Some(force_color) = &self.force_color {
            match force_color.as_str() {
                "0" | "false" => color = TerminalCapsDetectIntent::Never,
                "1" | "2" | "3" | "true" => color = TerminalCapsDetectIntent::Always,
                _ => {} // Invalid values ignored
            }
        }

        color
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}

use crate::application::AppConfig;
use crate::primitives::*;
use serde::Deserialize;
use std::io::{self, IsTerminal};

// ============================================================================
// CORE TERMINAL CAPABILITY STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalCapabilities {
    pub color: TerminalColorCaps,
    pub unicode: TerminalUnicodeCaps,
    pub is_tty: bool,
}

impl TerminalCapabilities {
    /// Capabilities of a plain pipe: no color, ASCII only
    pub fn plain() -> Self {
        Self {
            color: TerminalColorCaps::None,
            unicode: TerminalUnicodeCaps::Ascii,
            is_tty: false,
        }
    }
}

/// Environment variables consulted during detection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerminalEnvConfig {
    pub term: Option<String>,
    pub colorterm: Option<String>,
    pub lang: Option<String>,
    pub lc_all: Option<String>,
    pub lc_ctype: Option<String>,
}

// ============================================================================
// MAIN DETECTION IMPLEMENTATION
// ============================================================================

impl TerminalCapabilities {
    pub fn detect_from_config(config: &AppConfig) -> Result<Self, TerminalError> {
        let env_config = envy::from_env::<TerminalEnvConfig>()
            .map_err(|e| TerminalError::EnvironmentParsingFailed { source: e })?;

        let is_tty = io::stdout().is_terminal();

        // `console` enables VT processing on Windows consoles while answering this
        let colors_supported = is_tty && console::Term::stdout().features().colors_supported();

        let color = resolve_color(config.color, &env_config, colors_supported);
        let unicode = detect_unicode_capabilities(&env_config, is_tty);

        tracing::debug!(?color, ?unicode, is_tty, "terminal capabilities detected");

        Ok(Self {
            color,
            unicode,
            is_tty,
        })
    }
}

/// Combine the user's intent with what the terminal can actually render
pub fn resolve_color(
    intent: TerminalCapsDetectIntent,
    env_config: &TerminalEnvConfig,
    colors_supported: bool,
) -> TerminalColorCaps {
    match intent {
        TerminalCapsDetectIntent::Never => TerminalColorCaps::None,
        TerminalCapsDetectIntent::Always => detect_color_level(env_config),
        TerminalCapsDetectIntent::Auto if colors_supported => detect_color_level(env_config),
        TerminalCapsDetectIntent::Auto => TerminalColorCaps::None,
    }
}

/// Best color depth advertised by the environment, assuming color is wanted
pub fn detect_color_level(env_config: &TerminalEnvConfig) -> TerminalColorCaps {
    if let Some(colorterm) = &env_config.colorterm {
        let colorterm = colorterm.to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return TerminalColorCaps::TrueColor;
        }
    }

    match env_config.term.as_deref() {
        Some(term) if term.contains("256color") => TerminalColorCaps::Ansi256,
        _ => TerminalColorCaps::Ansi16,
    }
}

pub fn detect_unicode_capabilities(
    env_config: &TerminalEnvConfig,
    is_tty: bool,
) -> TerminalUnicodeCaps {
    // First non-empty locale variable wins, matching libc lookup order
    let locale = [&env_config.lc_all, &env_config.lc_ctype, &env_config.lang]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty());

    match locale {
        Some(value) => {
            let value = value.to_lowercase();
            if value.contains("utf-8") || value.contains("utf8") {
                TerminalUnicodeCaps::Unicode
            } else {
                TerminalUnicodeCaps::Ascii
            }
        }
        None if cfg!(windows) && is_tty => TerminalUnicodeCaps::Unicode,
        None => TerminalUnicodeCaps::Ascii,
    }
}

#[cfg(test)]
mod tests {
    include!("capabilities.test.rs");
}

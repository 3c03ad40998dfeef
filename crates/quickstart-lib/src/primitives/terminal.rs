use super::shared::impl_fromstr_for_value_enum;
use clap::ValueEnum;
use std::str::FromStr;
use thiserror::Error;

/// Runtime color detection intent
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalCapsDetectIntent {
    /// Let module detect
    /// alias: auto, automatic, detect, default
    Auto,

    /// Explicitly enable (useful in non-interactive)
    /// alias: always, force, on
    Always,

    /// Explicitly disable (also useful in non-interactive)
    /// alias: never, off
    Never,
}

impl ValueEnum for TerminalCapsDetectIntent {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Auto, Self::Always, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Auto => Some(
                clap::builder::PossibleValue::new("auto")
                    .alias("automatic")
                    .alias("detect")
                    .alias("default"),
            ),
            Self::Always => Some(
                clap::builder::PossibleValue::new("always")
                    .alias("force")
                    .alias("on"),
            ),
            Self::Never => Some(clap::builder::PossibleValue::new("never").alias("off")),
        }
    }
}

/// Terminal color capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalColorCaps {
    None,
    Ansi16,
    Ansi256,
    TrueColor,
}

impl TerminalColorCaps {
    pub fn is_enabled(&self) -> bool {
        *self != TerminalColorCaps::None
    }
}

/// Terminal unicode capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalUnicodeCaps {
    Ascii,
    Unicode,
}

/// Terminal detection errors
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Environment variable parsing failed: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },
}

impl_fromstr_for_value_enum!(
    TerminalCapsDetectIntent,
    "invalid terminal capability detection intent"
);

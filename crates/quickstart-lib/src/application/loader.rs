//! Configuration loading
//!
//! Combines the parsed command line with the color conventions of the
//! surrounding environment and validates the result.

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

impl AppConfig {
    /// Apply environment conventions on top of CLI values and validate
    pub fn resolve(mut self, env_config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        self.color = env_config.apply_color_config(self.color);
        self.validate()?;

        tracing::debug!(
            workdir = %self.project_dir().display(),
            color = ?self.color,
            "configuration resolved"
        );

        Ok(self)
    }

    /// Load config: defaults -> env vars -> CLI, with the given CLI values
    pub fn load(cli_config: AppConfig) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        cli_config.resolve(&env_config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}

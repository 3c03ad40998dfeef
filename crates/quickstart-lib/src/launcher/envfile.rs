//! `.env` provisioning
//!
//! A missing `.env` is created from [`DEFAULT_ENV_TEMPLATE`]. An existing one is
//! only read: parse problems and missing recommended keys become warnings.

use crate::application::session::Session;
use crate::launcher::errors::StageError;
use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = ".env";

/// Keys the application cannot run without
pub const RECOMMENDED_KEYS: [&str; 2] = ["DATABASE_URL", "NEXTAUTH_SECRET"];

pub const DEFAULT_ENV_TEMPLATE: &str = r#"# Database
DATABASE_URL="file:./dev.db"

# Mattermost integration (optional)
MATTERMOST_URL=""
MATTERMOST_TOKEN=""

# Application settings
NODE_ENV="development"
PORT=3000

# Session secret
NEXTAUTH_SECRET="your-secret-key-here"
NEXTAUTH_URL="http://localhost:3000"
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileState {
    Created,
    Existing,
}

/// The project's `.env` after provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub path: PathBuf,
    pub state: EnvFileState,
    pub values: Vec<(String, String)>,
}

impl EnvFile {
    /// Last assignment wins, as in dotenv loaders
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parsed assignments plus a description of every line that failed to parse
pub fn parse_env(content: &str) -> (Vec<(String, String)>, Vec<String>) {
    let mut values = Vec::new();
    let mut problems = Vec::new();

    for item in dotenvy::from_read_iter(content.as_bytes()) {
        match item {
            Ok(pair) => values.push(pair),
            Err(dotenvy::Error::Io(e)) => {
                problems.push(e.to_string());
                break;
            }
            Err(e) => problems.push(e.to_string()),
        }
    }

    (values, problems)
}

/// Make sure `<project_dir>/.env` exists; never touches an existing file
pub fn ensure_env_file(session: &dyn Session, project_dir: &Path) -> Result<EnvFile, StageError> {
    let status = session.display().status();
    let path = project_dir.join(ENV_FILE_NAME);

    if !session.filesystem().exists(&path) {
        status.warning(".env file not found, creating one with default settings...");
        session
            .filesystem()
            .write_file(&path, DEFAULT_ENV_TEMPLATE)
            .map_err(|e| StageError::filesystem("write", path.clone(), &e))?;
        tracing::info!(path = %path.display(), "created default env file");
        status.success(".env file created");

        let (values, _) = parse_env(DEFAULT_ENV_TEMPLATE);
        return Ok(EnvFile {
            path,
            state: EnvFileState::Created,
            values,
        });
    }

    status.success(".env file found");

    let values = match session.filesystem().read_to_string(&path) {
        Ok(content) => {
            let (values, problems) = parse_env(&content);
            for problem in &problems {
                status.warning(&format!("Could not parse .env: {}", problem));
            }
            values
        }
        Err(e) => {
            tracing::debug!(error = %e, "env file unreadable");
            status.warning(&format!("Could not read .env: {:#}", e));
            Vec::new()
        }
    };

    let env_file = EnvFile {
        path,
        state: EnvFileState::Existing,
        values,
    };
    for key in RECOMMENDED_KEYS {
        if env_file.get(key).is_none_or(str::is_empty) {
            status.warning(&format!("{} is not set in .env", key));
        }
    }

    Ok(env_file)
}

#[cfg(test)]
mod tests {
    include!("envfile.test.rs");
}

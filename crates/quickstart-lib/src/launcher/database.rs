//! Database provisioning through the Prisma CLI

use crate::application::session::Session;
use crate::launcher::envfile::EnvFile;
use crate::launcher::errors::StageError;
use crate::launcher::runner::{self, Invocation};
use crate::launcher::toolchain::Toolchain;
use std::path::{Component, Path, PathBuf};

/// Directory holding `schema.prisma`; relative SQLite paths resolve against it
pub const SCHEMA_DIR: &str = "prisma";
pub const DEFAULT_DATABASE_FILE: &str = "dev.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseOutcome {
    /// Fresh database: schema pushed and seeded
    Created,
    /// Existing database: schema pushed, no seed
    Migrated,
}

/// Local SQLite file targeted by the project's `DATABASE_URL`
pub fn database_path(project_dir: &Path, env_file: Option<&EnvFile>) -> PathBuf {
    let schema_dir = project_dir.join(SCHEMA_DIR);

    let file = env_file
        .and_then(|env| env.get("DATABASE_URL"))
        .and_then(|url| url.strip_prefix("file:"))
        .map(|location| location.split('?').next().unwrap_or(location))
        .filter(|location| !location.is_empty());

    match file {
        Some(location) => {
            let mut path = schema_dir;
            for component in Path::new(location).components() {
                match component {
                    Component::CurDir => {}
                    other => path.push(other),
                }
            }
            path
        }
        None => {
            tracing::debug!("no file: DATABASE_URL, using default database location");
            schema_dir.join(DEFAULT_DATABASE_FILE)
        }
    }
}

fn run_step(session: &dyn Session, action: &str, invocation: Invocation) -> Result<(), StageError> {
    runner::run(session.process(), &invocation)
        .map(|_| ())
        .map_err(|e| StageError::command(action, e))
}

/// Generate the client, then create+seed or migrate the database
pub fn provision_database(
    session: &dyn Session,
    toolchain: &Toolchain,
    project_dir: &Path,
    database: &Path,
    force_seed: bool,
) -> Result<DatabaseOutcome, StageError> {
    let status = session.display().status();
    let prisma = |args: &[&str]| toolchain.prisma(args.iter().copied()).current_dir(project_dir);

    status.info("Setting up the database...");
    run_step(session, "Prisma client generation", prisma(&["generate"]))?;

    if force_seed && session.filesystem().exists(database) {
        status.warning("Recreating the database...");
        session
            .filesystem()
            .remove_file(database)
            .map_err(|e| StageError::filesystem("remove", database.to_path_buf(), &e))?;
        tracing::info!(path = %database.display(), "removed database for reseed");
    }

    if !session.filesystem().exists(database) {
        status.info("Creating the database...");
        run_step(session, "Database schema push", prisma(&["db", "push"]))?;

        status.info("Seeding the database with sample data...");
        run_step(session, "Database seeding", prisma(&["db", "seed"]))?;

        status.success("Database created and seeded");
        Ok(DatabaseOutcome::Created)
    } else {
        status.info("Database already exists, applying schema changes...");
        run_step(session, "Database schema push", prisma(&["db", "push"]))?;

        status.success("Database updated");
        Ok(DatabaseOutcome::Migrated)
    }
}

#[cfg(test)]
mod tests {
    include!("database.test.rs");
}

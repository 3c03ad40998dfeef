//! Prerequisite checks for the Node.js runtime and npm

use crate::application::session::Session;
use crate::launcher::errors::StageError;
use crate::launcher::runner;
use crate::launcher::toolchain::{MIN_RUNTIME_MAJOR, RUNTIME_DOWNLOAD_URL, Toolchain};

/// Version text without the leading `v`, e.g. `20.11.1`
pub fn normalize_version(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('v').unwrap_or(trimmed)
}

/// Leading major number of a `v<major>.<minor>.<patch>` version string
///
/// Full semver is tried first; anything else falls back to the digits before
/// the first dot so that builds like `v21.0.0-nightly2023` still parse.
pub fn parse_major_version(raw: &str) -> Option<u64> {
    let version = normalize_version(raw);
    if let Ok(parsed) = semver::Version::parse(version) {
        return Some(parsed.major);
    }
    version.split('.').next()?.trim().parse().ok()
}

/// Is Node.js on the path and at least the supported major version
pub fn check_runtime(session: &dyn Session, toolchain: &Toolchain) -> bool {
    let status = session.display().status();

    if session.process().find_program(toolchain.runtime).is_none() {
        status.error("Node.js is not installed!");
        status.info(&format!(
            "Install Node.js {}+ from {}",
            MIN_RUNTIME_MAJOR, RUNTIME_DOWNLOAD_URL
        ));
        return false;
    }

    let output = match runner::run(session.process(), &toolchain.runtime_version()) {
        Ok(output) => output,
        Err(e) => {
            status.error(&format!("Failed to check Node.js: {}", e));
            e.report(status.as_ref());
            return false;
        }
    };

    let raw = output.stdout.unwrap_or_default();
    let version = normalize_version(&raw);
    tracing::debug!(version, "runtime version reported");

    match parse_major_version(&raw) {
        Some(major) if major >= MIN_RUNTIME_MAJOR => {
            status.success(&format!("Node.js version {} found", version));
            true
        }
        Some(_) => {
            status.error(&format!(
                "Node.js {}+ is required, found version {}",
                MIN_RUNTIME_MAJOR, version
            ));
            status.info(&format!(
                "Install Node.js {}+ from {}",
                MIN_RUNTIME_MAJOR, RUNTIME_DOWNLOAD_URL
            ));
            false
        }
        None => {
            status.error(&format!(
                "Failed to check Node.js: unrecognized version {:?}",
                version
            ));
            false
        }
    }
}

/// Is npm on the path and able to report its version
pub fn check_package_manager(session: &dyn Session, toolchain: &Toolchain) -> bool {
    let status = session.display().status();

    if session
        .process()
        .find_program(toolchain.package_manager)
        .is_none()
    {
        status.error("npm is not installed!");
        status.info(&format!("npm ships with Node.js: {}", RUNTIME_DOWNLOAD_URL));
        return false;
    }

    match runner::run(session.process(), &toolchain.package_manager_version()) {
        Ok(output) => {
            let version = output.stdout.unwrap_or_default();
            tracing::debug!(version = version.trim(), "package manager version reported");
            status.success(&format!("npm version {} found", version.trim()));
            true
        }
        Err(e) => {
            status.error(&format!("Failed to check npm: {}", e));
            e.report(status.as_ref());
            false
        }
    }
}

/// Run both checks; either failing is fatal for the pipeline
pub fn probe(session: &dyn Session, toolchain: &Toolchain) -> Result<(), StageError> {
    let mut missing = Vec::new();

    if !check_runtime(session, toolchain) {
        missing.push(format!("Node.js {}+", MIN_RUNTIME_MAJOR));
    }
    if !check_package_manager(session, toolchain) {
        missing.push("npm".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StageError::Prerequisites { missing })
    }
}

#[cfg(test)]
mod tests {
    include!("prober.test.rs");
}

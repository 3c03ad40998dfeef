//! Port negotiation
//!
//! A port is considered taken when a TCP connect to localhost succeeds. On a
//! conflict the operator is shown what holds the port (best effort) and asked
//! for another one until a free port is found or they give up.

use crate::application::session::{ProcessProvider, Session};
use crate::launcher::errors::StageError;
use crate::launcher::runner::{self, Invocation};
use crate::platform::PlatformInfo;

/// Lists the processes holding a port, for diagnostics only
pub trait PortInspector {
    fn name(&self) -> &'static str;

    /// `None` when the listing tool is unavailable, fails, or finds nothing
    fn listeners(&self, process: &dyn ProcessProvider, port: u16) -> Option<String>;
}

/// Unix: `lsof -i:<port>`
pub struct LsofInspector;

impl PortInspector for LsofInspector {
    fn name(&self) -> &'static str {
        "lsof"
    }

    fn listeners(&self, process: &dyn ProcessProvider, port: u16) -> Option<String> {
        let invocation = Invocation::new("lsof")
            .arg(format!("-i:{}", port))
            .capture()
            .unchecked();
        let output = runner::run(process, &invocation)
            .inspect_err(|e| tracing::debug!(error = %e, "port listing unavailable"))
            .ok()?;

        output.stdout.filter(|stdout| !stdout.trim().is_empty())
    }
}

/// Windows: listening rows of `netstat -ano` for the port
pub struct NetstatInspector;

impl NetstatInspector {
    pub fn filter_listening(table: &str, port: u16) -> Vec<String> {
        let needle = format!(":{} ", port);
        table
            .lines()
            .filter(|line| line.contains(&needle) && line.contains("LISTENING"))
            .map(|line| line.trim().to_string())
            .collect()
    }
}

impl PortInspector for NetstatInspector {
    fn name(&self) -> &'static str {
        "netstat"
    }

    fn listeners(&self, process: &dyn ProcessProvider, port: u16) -> Option<String> {
        let invocation = Invocation::new("netstat")
            .arg("-ano")
            .capture()
            .unchecked();
        let output = runner::run(process, &invocation)
            .inspect_err(|e| tracing::debug!(error = %e, "port listing unavailable"))
            .ok()?;

        let rows = Self::filter_listening(output.stdout.as_deref().unwrap_or_default(), port);
        (!rows.is_empty()).then(|| rows.join("\n"))
    }
}

pub fn platform_inspector(platform: &PlatformInfo) -> Box<dyn PortInspector> {
    if platform.is_windows() {
        Box::new(NetstatInspector)
    } else {
        Box::new(LsofInspector)
    }
}

/// Operator-entered port; zero and non-numeric input are rejected
pub fn parse_port(input: &str) -> Option<u16> {
    input.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

/// Return a free port, starting from `requested`
pub fn negotiate_port(
    session: &dyn Session,
    inspector: &dyn PortInspector,
    requested: u16,
) -> Result<u16, StageError> {
    let status = session.display().status();
    let mut port = requested;

    loop {
        if !session.network().is_port_in_use(port) {
            tracing::debug!(port, "port is free");
            return Ok(port);
        }

        status.warning(&format!("Port {} is already in use!", port));
        if let Some(listing) = inspector.listeners(session.process(), port) {
            status.info("Processes using this port:");
            status.detail(&listing);
        }

        let retry = session
            .interactive()
            .confirm("Do you want to try a different port?", false)
            .map_err(|e| {
                tracing::debug!(error = %e, "retry prompt aborted");
                StageError::Cancelled
            })?;
        if !retry {
            return Err(StageError::Cancelled);
        }

        let input = session
            .interactive()
            .text_input(
                &format!("Enter a different port (current: {})", port),
                String::new(),
            )
            .map_err(|e| {
                tracing::debug!(error = %e, "port prompt aborted");
                StageError::Cancelled
            })?;

        port = parse_port(&input).ok_or(StageError::InvalidPort { input })?;
        tracing::info!(port, "operator chose another port");
    }
}

#[cfg(test)]
mod tests {
    include!("ports.test.rs");
}

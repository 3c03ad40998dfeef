//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each launcher run creates a session that owns every side-effecting provider.

use crate::application::config::AppConfig;
use crate::application::shutdown::{SupervisionGuard, shutdown_signal};
use crate::display::{DisplayProvider, LiveDisplayProvider};
use crate::launcher::runner::Invocation;
use crate::platform::{ProgramFinder, prepend_search_path};
use crate::terminal::TerminalCapabilities;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

/// Exit code a shell reports for a child stopped by SIGINT
const SIGINT_EXIT_CODE: i32 = 130;

/// Connect timeout for the port probe
const PORT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    fn exists(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// Provider trait for network operations
pub trait NetworkProvider {
    /// True when something accepts TCP connections on localhost:`port`
    fn is_port_in_use(&self, port: u16) -> bool;
}

/// Process execution output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Present only for captured invocations
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Output of a non-captured invocation
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: None,
            stderr: None,
        }
    }

    pub fn captured(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            code: Some(code),
            stdout: Some(stdout.to_string()),
            stderr: Some(stderr.to_string()),
        }
    }
}

/// How a supervised child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// The child stopped on its own
    Exited(Option<i32>),
    /// The operator asked for shutdown while the child was running
    Interrupted,
}

impl ChildExit {
    fn from_status(status: ExitStatus) -> Self {
        // No code means the child died from a signal, typically the operator's Ctrl-C
        match status.code() {
            None | Some(SIGINT_EXIT_CODE) => ChildExit::Interrupted,
            code => ChildExit::Exited(code),
        }
    }
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Resolve a program on this provider's search path
    fn find_program(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion, blocking the caller
    fn execute(&self, invocation: &Invocation) -> Result<ProcessOutput>;

    /// Run in the foreground with inherited streams until it exits or the
    /// launcher receives an interrupt/termination signal
    fn supervise<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildExit>> + 'a>>;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    fn app_config(&self) -> &AppConfig;
}

/// Provider trait for interactive user input operations
pub trait InteractiveProvider {
    /// Prompt for text input; an empty default means no default
    fn text_input(&self, prompt: &str, default: String) -> Result<String>;

    /// Prompt for confirmation (yes/no)
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Session trait that both CommandSession and MockCommandSession implement
pub trait Session {
    fn display(&self) -> &dyn DisplayProvider;

    fn filesystem(&self) -> &dyn FileSystemProvider;

    fn network(&self) -> &dyn NetworkProvider;

    fn process(&self) -> &dyn ProcessProvider;

    fn config(&self) -> &dyn ConfigProvider;

    fn interactive(&self) -> &dyn InteractiveProvider;
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove file: {}", path.display()))
    }
}

/// Live implementation of NetworkProvider
pub struct LiveNetworkProvider;

impl NetworkProvider for LiveNetworkProvider {
    fn is_port_in_use(&self, port: u16) -> bool {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let in_use = TcpStream::connect_timeout(&addr, PORT_PROBE_TIMEOUT).is_ok();
        tracing::debug!(port, in_use, "probed port");
        in_use
    }
}

/// Live implementation of ProcessProvider
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<OsString>,
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH
    pub fn with_custom_path(path: OsString) -> Self {
        Self {
            custom_path: Some(path),
        }
    }

    /// Provider whose PATH has `test_bin_path` in front of the system PATH
    pub fn new_for_test(test_bin_path: Option<PathBuf>) -> Self {
        match test_bin_path {
            Some(bin_path) => Self::with_custom_path(prepend_search_path(
                &bin_path,
                std::env::var_os("PATH").as_deref(),
            )),
            None => Self::new(),
        }
    }

    fn search_path(&self) -> Option<OsString> {
        self.custom_path.clone().or_else(|| std::env::var_os("PATH"))
    }

    /// Absolute program path when resolvable, otherwise the bare name
    fn resolve(&self, program: &str) -> PathBuf {
        self.find_program(program)
            .unwrap_or_else(|| PathBuf::from(program))
    }

    /// Extra environment shared by blocking and supervised launches
    fn child_env(&self, invocation: &Invocation) -> Vec<(OsString, OsString)> {
        let mut env: Vec<(OsString, OsString)> = invocation
            .env
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect();
        if let Some(custom_path) = &self.custom_path {
            env.push((OsString::from("PATH"), custom_path.clone()));
        }
        env
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn find_program(&self, program: &str) -> Option<PathBuf> {
        ProgramFinder::find_with_path(program, self.search_path().as_deref()).path
    }

    fn execute(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        use std::process::Command;

        let mut cmd = Command::new(self.resolve(&invocation.program));
        cmd.args(&invocation.args).envs(self.child_env(invocation));
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }

        if invocation.capture_output {
            let output = cmd
                .output()
                .with_context(|| format!("Failed to execute command: {}", invocation))?;

            Ok(ProcessOutput {
                code: output.status.code(),
                stdout: Some(String::from_utf8_lossy(&output.stdout).to_string()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
            })
        } else {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .with_context(|| format!("Failed to execute command: {}", invocation))?;

            Ok(ProcessOutput {
                code: status.code(),
                stdout: None,
                stderr: None,
            })
        }
    }

    fn supervise<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildExit>> + 'a>> {
        Box::pin(async move {
            let mut cmd = tokio::process::Command::new(self.resolve(&invocation.program));
            cmd.args(&invocation.args)
                .envs(self.child_env(invocation))
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
            if let Some(dir) = &invocation.working_dir {
                cmd.current_dir(dir);
            }

            // Stop signals belong to this child until it is reaped
            let _guard = SupervisionGuard::acquire();
            let mut child = cmd
                .spawn()
                .with_context(|| format!("Failed to start command: {}", invocation))?;
            tracing::info!(command = %invocation, pid = ?child.id(), "supervising child process");

            tokio::select! {
                status = child.wait() => {
                    let status = status.context("Failed to wait for child process")?;
                    tracing::info!(command = %invocation, code = ?status.code(), "child process exited");
                    Ok(ChildExit::from_status(status))
                }
                _ = shutdown_signal() => {
                    tracing::info!(command = %invocation, "stop signal received, stopping child");
                    request_child_stop(&mut child);

                    // A second signal while waiting kills the child outright
                    tokio::select! {
                        status = child.wait() => {
                            status.context("Failed to wait for child process")?;
                        }
                        _ = shutdown_signal() => {
                            let _ = child.start_kill();
                            let _ = child.wait().await;
                        }
                    }
                    Ok(ChildExit::Interrupted)
                }
            }
        })
    }
}

#[cfg(unix)]
fn request_child_stop(child: &mut tokio::process::Child) {
    match child.id() {
        Some(pid) => unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        },
        None => {
            let _ = child.start_kill();
        }
    }
}

#[cfg(not(unix))]
fn request_child_stop(child: &mut tokio::process::Child) {
    let _ = child.start_kill();
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Live implementation of InteractiveProvider
pub struct LiveInteractiveProvider;

impl LiveInteractiveProvider {
    /// Check if we're in a TTY environment suitable for interactive prompts
    fn is_tty() -> bool {
        use std::io::IsTerminal;
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }
}

impl InteractiveProvider for LiveInteractiveProvider {
    fn text_input(&self, prompt: &str, default: String) -> Result<String> {
        if !Self::is_tty() {
            return Ok(default);
        }

        use dialoguer::Input;

        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default);
        }

        input.interact_text().context("Failed to read text input")
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !Self::is_tty() {
            return Ok(default);
        }

        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("Failed to read confirmation")
    }
}

/// CommandSession owns all ephemeral state for a single launcher run
pub struct CommandSession<F, N, P, C, I>
where
    F: FileSystemProvider,
    N: NetworkProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
    display_provider: LiveDisplayProvider,
    filesystem_provider: F,
    network_provider: N,
    process_provider: P,
    config_provider: C,
    interactive_provider: I,
}

impl
    CommandSession<
        LiveFileSystemProvider,
        LiveNetworkProvider,
        LiveProcessProvider,
        LiveConfigProvider,
        LiveInteractiveProvider,
    >
{
    /// Production composition
    pub fn new(app_config: AppConfig, capabilities: &TerminalCapabilities) -> Self {
        Self {
            display_provider: LiveDisplayProvider::new(capabilities),
            filesystem_provider: LiveFileSystemProvider,
            network_provider: LiveNetworkProvider,
            process_provider: LiveProcessProvider::new(),
            config_provider: LiveConfigProvider::new(app_config),
            interactive_provider: LiveInteractiveProvider,
        }
    }
}

impl<F, N, P, C, I> CommandSession<F, N, P, C, I>
where
    F: FileSystemProvider,
    N: NetworkProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
    /// Create a command session with custom providers (for testing)
    #[cfg(feature = "test-utils")]
    pub fn new_with_providers(
        filesystem_provider: F,
        network_provider: N,
        process_provider: P,
        config_provider: C,
        interactive_provider: I,
    ) -> Self {
        Self {
            display_provider: LiveDisplayProvider::new(&TerminalCapabilities::plain()),
            filesystem_provider,
            network_provider,
            process_provider,
            config_provider,
            interactive_provider,
        }
    }
}

impl<F, N, P, C, I> Session for CommandSession<F, N, P, C, I>
where
    F: FileSystemProvider,
    N: NetworkProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn network(&self) -> &dyn NetworkProvider {
        &self.network_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }

    fn interactive(&self) -> &dyn InteractiveProvider {
        &self.interactive_provider
    }
}

#[cfg(test)]
mod tests {
    include!("session.test.rs");
}

//! Mock implementations of session providers for testing
//!
//! Every mock records what it was asked to do (spy pattern) so tests can
//! assert on ordering and arguments of external invocations.

use crate::application::config::AppConfig;
use crate::application::session::*;
use crate::display::{DisplayProvider, MockDisplayProvider};
use crate::launcher::runner::Invocation;
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Mock filesystem provider backed by in-memory maps
#[derive(Clone)]
pub struct MockFileSystemProvider {
    /// In-memory filesystem: path -> content
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub directories: Arc<Mutex<HashSet<PathBuf>>>,
    pub read_only: bool,
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            directories: Arc::new(Mutex::new(HashSet::new())),
            read_only: false,
        }
    }

    pub fn with_file(self, path: PathBuf, content: &str) -> Self {
        if let Some(parent) = path.parent() {
            self.directories
                .lock()
                .unwrap()
                .insert(parent.to_path_buf());
        }
        self.files.lock().unwrap().insert(path, content.to_string());
        self
    }

    pub fn with_directory(self, path: PathBuf) -> Self {
        self.directories.lock().unwrap().insert(path);
        self
    }

    /// Every write and removal fails
    pub fn with_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn file_content(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.file_content(path)
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.read_only {
            anyhow::bail!("Read-only filesystem: {}", path.display());
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if self.read_only {
            anyhow::bail!("Read-only filesystem: {}", path.display());
        }
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }
}

/// Mock network provider with a fixed set of occupied ports
#[derive(Clone, Default)]
pub struct MockNetworkProvider {
    pub occupied: HashSet<u16>,
    pub probed: Arc<Mutex<Vec<u16>>>,
}

impl MockNetworkProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occupied_port(mut self, port: u16) -> Self {
        self.occupied.insert(port);
        self
    }

    pub fn get_probed_ports(&self) -> Vec<u16> {
        self.probed.lock().unwrap().clone()
    }
}

impl NetworkProvider for MockNetworkProvider {
    fn is_port_in_use(&self, port: u16) -> bool {
        self.probed.lock().unwrap().push(port);
        self.occupied.contains(&port)
    }
}

/// Process call record for spy pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub working_dir: Option<PathBuf>,
    /// Launched through `supervise` rather than `execute`
    pub supervised: bool,
}

impl ProcessCall {
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type CallKey = (String, Vec<String>);

/// Mock process provider for testing with spy pattern
pub struct MockProcessProvider {
    pub available: HashSet<String>,
    pub calls: RefCell<Vec<ProcessCall>>,
    pub results: HashMap<CallKey, std::result::Result<ProcessOutput, String>>,
    pub supervised: HashMap<CallKey, std::result::Result<ChildExit, String>>,
}

impl Default for MockProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProcessProvider {
    /// Node 20 toolchain on the path, every command succeeding
    pub fn new() -> Self {
        let provider = Self {
            available: ["node", "npm", "npx", "npm.cmd", "npx.cmd", "lsof", "netstat"]
                .into_iter()
                .map(String::from)
                .collect(),
            calls: RefCell::new(Vec::new()),
            results: HashMap::new(),
            supervised: HashMap::new(),
        };

        provider
            .with_result("node", &["--version"], Ok(ProcessOutput::captured(0, "v20.11.1\n", "")))
            .with_package_manager_result(&["--version"], Ok(ProcessOutput::captured(0, "10.2.4\n", "")))
    }

    pub fn with_program_unavailable(mut self, program: &str) -> Self {
        self.available.remove(program);
        self
    }

    pub fn with_result(
        mut self,
        command: &str,
        args: &[&str],
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.results.insert(key(command, args), result);
        self
    }

    /// Same result for `npm` and `npm.cmd`
    pub fn with_package_manager_result(
        self,
        args: &[&str],
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.with_result("npm", args, result.clone())
            .with_result("npm.cmd", args, result)
    }

    /// Same result for `npx` and `npx.cmd`
    pub fn with_runner_result(
        self,
        args: &[&str],
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.with_result("npx", args, result.clone())
            .with_result("npx.cmd", args, result)
    }

    pub fn with_runtime_version(self, version: &str) -> Self {
        self.with_result(
            "node",
            &["--version"],
            Ok(ProcessOutput::captured(0, &format!("{}\n", version), "")),
        )
    }

    /// Outcome of a supervised `npm`/`npm.cmd` launch
    pub fn with_supervised(
        mut self,
        args: &[&str],
        result: std::result::Result<ChildExit, String>,
    ) -> Self {
        self.supervised.insert(key("npm", args), result.clone());
        self.supervised.insert(key("npm.cmd", args), result);
        self
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Recorded command lines with `.cmd` suffixes stripped, for platform-neutral asserts
    pub fn get_command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.command_line().replacen(".cmd", "", 1))
            .collect()
    }

    pub fn get_calls_for_command(&self, command: &str) -> Vec<ProcessCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.command.trim_end_matches(".cmd") == command)
            .cloned()
            .collect()
    }

    fn record(&self, invocation: &Invocation, supervised: bool) {
        self.calls.borrow_mut().push(ProcessCall {
            command: invocation.program.clone(),
            args: invocation.args.clone(),
            env: invocation.env.clone(),
            working_dir: invocation.working_dir.clone(),
            supervised,
        });
    }
}

fn key(command: &str, args: &[&str]) -> CallKey {
    (
        command.to_string(),
        args.iter().map(|s| s.to_string()).collect(),
    )
}

impl ProcessProvider for MockProcessProvider {
    fn find_program(&self, program: &str) -> Option<PathBuf> {
        self.available
            .contains(program)
            .then(|| PathBuf::from("/usr/local/bin").join(program))
    }

    fn execute(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.record(invocation, false);

        let key = (invocation.program.clone(), invocation.args.clone());
        match self.results.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None if invocation.capture_output => Ok(ProcessOutput::captured(0, "", "")),
            None => Ok(ProcessOutput::exited(0)),
        }
    }

    fn supervise<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildExit>> + 'a>> {
        self.record(invocation, true);

        let key = (invocation.program.clone(), invocation.args.clone());
        let result = match self.supervised.get(&key) {
            Some(Ok(exit)) => Ok(*exit),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(ChildExit::Exited(Some(0))),
        };

        Box::pin(async move { result })
    }
}

/// Mock configuration provider
pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Mock interactive provider with queued answers
///
/// Answers are consumed in order; once a queue is empty the prompt's
/// default is returned, like a non-interactive terminal would.
#[derive(Clone, Default)]
pub struct MockInteractiveProvider {
    pub text_input_calls: Arc<Mutex<Vec<(String, String)>>>, // (prompt, default)
    pub confirm_calls: Arc<Mutex<Vec<(String, bool)>>>,      // (prompt, default)
    pub text_input_responses: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    pub confirm_responses: Arc<Mutex<VecDeque<std::result::Result<bool, String>>>>,
}

impl MockInteractiveProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_input(self, response: &str) -> Self {
        self.text_input_responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    /// Queue a failed text prompt (e.g. Ctrl-C at the prompt)
    pub fn with_text_input_error(self, error: &str) -> Self {
        self.text_input_responses
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn with_confirm(self, response: bool) -> Self {
        self.confirm_responses
            .lock()
            .unwrap()
            .push_back(Ok(response));
        self
    }

    pub fn with_confirm_error(self, error: &str) -> Self {
        self.confirm_responses
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn get_text_input_calls(&self) -> Vec<(String, String)> {
        self.text_input_calls.lock().unwrap().clone()
    }

    pub fn get_confirm_calls(&self) -> Vec<(String, bool)> {
        self.confirm_calls.lock().unwrap().clone()
    }
}

impl InteractiveProvider for MockInteractiveProvider {
    fn text_input(&self, prompt: &str, default: String) -> Result<String> {
        self.text_input_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), default.clone()));

        match self.text_input_responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(default),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.confirm_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), default));

        match self.confirm_responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(default),
        }
    }
}

/// Mock command session for testing
pub struct MockCommandSession {
    pub display_provider: MockDisplayProvider,
    pub filesystem_provider: MockFileSystemProvider,
    pub network_provider: MockNetworkProvider,
    pub process_provider: MockProcessProvider,
    pub config_provider: MockConfigProvider,
    pub interactive_provider: MockInteractiveProvider,
}

impl Default for MockCommandSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommandSession {
    /// Session rooted at `/test/project` with a healthy toolchain
    pub fn new() -> Self {
        let app_config = AppConfig {
            workdir: Some(PathBuf::from("/test/project")),
            ..AppConfig::default()
        };

        Self {
            display_provider: MockDisplayProvider::new(),
            filesystem_provider: MockFileSystemProvider::new()
                .with_directory(PathBuf::from("/test/project")),
            network_provider: MockNetworkProvider::new(),
            process_provider: MockProcessProvider::new(),
            config_provider: MockConfigProvider::new(app_config),
            interactive_provider: MockInteractiveProvider::new(),
        }
    }

    pub fn workdir(&self) -> PathBuf {
        self.config_provider.app_config.project_dir().to_path_buf()
    }

    pub fn with_filesystem(mut self, filesystem: MockFileSystemProvider) -> Self {
        self.filesystem_provider = filesystem;
        self
    }

    pub fn with_network(mut self, network: MockNetworkProvider) -> Self {
        self.network_provider = network;
        self
    }

    pub fn with_process(mut self, process: MockProcessProvider) -> Self {
        self.process_provider = process;
        self
    }

    pub fn with_interactive(mut self, interactive: MockInteractiveProvider) -> Self {
        self.interactive_provider = interactive;
        self
    }
}

impl Session for MockCommandSession {
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
    use super::*;

    #[test]
    fn test_mock_filesystem_provider() {
        let fs = MockFileSystemProvider::new()
            .with_file(PathBuf::from("/p/.env"), "PORT=3000\n")
            .with_directory(PathBuf::from("/p/node_modules"));

        assert!(fs.exists(Path::new("/p/.env")));
        assert!(fs.is_directory(Path::new("/p")));
        assert!(fs.is_directory(Path::new("/p/node_modules")));
        assert_eq!(fs.read_to_string(Path::new("/p/.env")).unwrap(), "PORT=3000\n");

        fs.remove_file(Path::new("/p/.env")).unwrap();
        assert!(!fs.exists(Path::new("/p/.env")));
        assert!(fs.remove_file(Path::new("/p/.env")).is_err());
    }

    #[test]
    fn test_read_only_filesystem_rejects_writes() {
        let fs = MockFileSystemProvider::new().with_read_only();
        assert!(fs.write_file(Path::new("/p/.env"), "").is_err());
    }

    #[test]
    fn test_mock_process_provider() {
        let provider = MockProcessProvider::new().with_result(
            "npm",
            &["install"],
            Err("Mock error".to_string()),
        );

        let output = provider
            .execute(&Invocation::new("npm").arg("ci"))
            .unwrap();
        assert!(output.success());
        assert!(provider.execute(&Invocation::new("npm").arg("install")).is_err());

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, vec!["ci"]);
        assert!(!calls[0].supervised);
        assert_eq!(provider.get_command_lines(), vec!["npm ci", "npm install"]);
    }

    #[test]
    fn test_mock_program_lookup() {
        let provider = MockProcessProvider::new().with_program_unavailable("node");
        assert_eq!(provider.find_program("node"), None);
        assert!(provider.find_program("npm").is_some());
    }

    #[tokio::test]
    async fn test_mock_supervise_records_env() {
        let provider = MockProcessProvider::new()
            .with_supervised(&["run", "dev"], Ok(ChildExit::Interrupted));
        let invocation = Invocation::new("npm").args(["run", "dev"]).env("PORT", "3001");

        let exit = provider.supervise(&invocation).await.unwrap();
        assert_eq!(exit, ChildExit::Interrupted);

        let calls = provider.get_calls();
        assert!(calls[0].supervised);
        assert_eq!(calls[0].env_value("PORT"), Some("3001"));
    }

    #[test]
    fn test_mock_interactive_queues_then_defaults() {
        let interactive = MockInteractiveProvider::new()
            .with_confirm(true)
            .with_text_input("4000");

        assert!(interactive.confirm("Try again?", false).unwrap());
        assert!(!interactive.confirm("Try again?", false).unwrap());
        assert_eq!(interactive.text_input("Port", String::new()).unwrap(), "4000");
        assert_eq!(interactive.text_input("Port", "x".to_string()).unwrap(), "x");
        assert_eq!(interactive.get_confirm_calls().len(), 2);
    }
}

//! Hermetic test environment for E2E testing
//!
//! A [`TestEnvironment`] is a temporary directory with a private `bin/` of mock
//! `node`/`npm`/`npx` shell scripts and a `work/` project directory. Every mock
//! appends `<name> <args>` to one shared call log, so tests can assert on the
//! exact order of external invocations across tools.

use anyhow::Result;
use quickstart_lib::application::config::AppConfig;
use quickstart_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveProcessProvider,
};
use quickstart_lib::application::session_mocks::{MockInteractiveProvider, MockNetworkProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Session type produced by [`HermeticSessionBuilder`]
pub type HermeticSession = CommandSession<
    LiveFileSystemProvider,
    MockNetworkProvider,
    LiveProcessProvider,
    LiveConfigProvider,
    MockInteractiveProvider,
>;

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
    /// Directory holding the mock executables; the only entry on PATH
    pub bin_path: PathBuf,
    /// Project directory the launcher works in
    pub work_path: PathBuf,
    log_path: PathBuf,
}

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with empty output
    AlwaysSucceed,
    /// Print to stderr and exit 1
    AlwaysFail { error: String },
    SucceedWithOutput { stdout: String, stderr: String },
    /// Run a shell snippet, then exit 0 unless the snippet exits first
    Script { body: String },
    /// First matching rule wins; unmatched calls succeed
    Conditional { rules: Vec<ConditionalRule> },
}

/// Conditional rule for mock executable behavior
#[derive(Debug, Clone)]
pub struct ConditionalRule {
    /// Exact argument list to match
    pub args_pattern: Vec<String>,
    pub behavior: MockBehavior,
}

impl ConditionalRule {
    pub fn new(args: &[&str], behavior: MockBehavior) -> Self {
        Self {
            args_pattern: args.iter().map(|s| s.to_string()).collect(),
            behavior,
        }
    }
}

impl MockBehavior {
    pub fn output(stdout: &str) -> Self {
        MockBehavior::SucceedWithOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn fail(error: &str) -> Self {
        MockBehavior::AlwaysFail {
            error: error.to_string(),
        }
    }

    pub fn script(body: &str) -> Self {
        MockBehavior::Script {
            body: body.to_string(),
        }
    }

    fn shell_code(&self) -> String {
        match self {
            MockBehavior::AlwaysSucceed => "exit 0".to_string(),
            MockBehavior::AlwaysFail { error } => format!("echo '{}' >&2\nexit 1", error),
            MockBehavior::SucceedWithOutput { stdout, stderr } => {
                let mut code = String::new();
                if !stdout.is_empty() {
                    code.push_str(&format!("echo '{}'\n", stdout));
                }
                if !stderr.is_empty() {
                    code.push_str(&format!("echo '{}' >&2\n", stderr));
                }
                code.push_str("exit 0");
                code
            }
            MockBehavior::Script { body } => format!("{}\nexit 0", body),
            MockBehavior::Conditional { rules } => {
                let mut code = String::new();
                for rule in rules {
                    code.push_str(&format!(
                        "if [ \"$*\" = \"{}\" ]; then\n{}\nfi\n",
                        rule.args_pattern.join(" "),
                        rule.behavior.shell_code()
                    ));
                }
                code.push_str("exit 0");
                code
            }
        }
    }
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_path = temp_dir.path().to_path_buf();
        let bin_path = root_path.join("bin");
        let work_path = root_path.join("work");
        let log_path = root_path.join("calls.log");

        fs::create_dir_all(&bin_path)?;
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            root_path,
            bin_path,
            work_path,
            log_path,
        })
    }

    /// Write `bin/<name>` as an executable shell script
    pub fn add_mock_executable(&self, name: &str, behavior: MockBehavior) -> Result<()> {
        let executable_path = self.bin_path.join(name);
        let script = format!(
            "#!/bin/sh\n# Mock executable: {name}\nPATH=\"/usr/bin:/bin\"\necho \"{name} $*\" >> \"{log}\"\n{code}\n",
            name = name,
            log = self.log_path.display(),
            code = behavior.shell_code()
        );
        fs::write(&executable_path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        Ok(())
    }

    /// Install `node`, `npm` and `npx` mocks behaving like a healthy toolchain
    ///
    /// `prisma db push` creates `prisma/dev.db` and `npm run dev` records the
    /// injected `PORT`/`NODE_ENV` in `work/launch.env`.
    pub fn install_toolchain(&self, node_version: &str) -> Result<()> {
        self.add_mock_executable("node", MockBehavior::output(node_version))?;
        self.add_mock_executable(
            "npm",
            MockBehavior::Conditional {
                rules: vec![
                    ConditionalRule::new(&["--version"], MockBehavior::output("10.2.4")),
                    ConditionalRule::new(&["run", "dev"], Self::record_launch_env()),
                    ConditionalRule::new(&["start"], Self::record_launch_env()),
                ],
            },
        )?;
        self.add_mock_executable(
            "npx",
            MockBehavior::Conditional {
                rules: vec![ConditionalRule::new(
                    &["prisma", "db", "push"],
                    MockBehavior::script("mkdir -p prisma && touch prisma/dev.db"),
                )],
            },
        )?;
        Ok(())
    }

    fn record_launch_env() -> MockBehavior {
        MockBehavior::script("echo \"PORT=$PORT NODE_ENV=$NODE_ENV\" >> launch.env")
    }

    /// Every recorded call, in order, as `<name> <args>`
    pub fn get_all_calls(&self) -> Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&self.log_path)?
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect())
    }

    /// Recorded argument lists of one executable
    pub fn get_mock_calls(&self, executable_name: &str) -> Result<Vec<String>> {
        let prefix = format!("{} ", executable_name);
        Ok(self
            .get_all_calls()?
            .into_iter()
            .filter(|line| line.starts_with(&prefix) || line == executable_name)
            .map(|line| line[executable_name.len()..].trim().to_string())
            .collect())
    }

    /// Verify that a mock executable was called with specific arguments
    pub fn verify_mock_call(&self, executable_name: &str, args: &[&str]) -> Result<bool> {
        let expected = args.join(" ");
        Ok(self
            .get_mock_calls(executable_name)?
            .iter()
            .any(|call| *call == expected))
    }

    pub fn write_project_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.work_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_project_dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.work_path.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn read_project_file(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.work_path.join(relative))?)
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.work_path.join(relative)
    }

    pub fn project_dir(&self) -> &Path {
        &self.work_path
    }
}

/// Builder for hermetic sessions: live filesystem and processes confined to
/// the test environment, mocked network probe and prompts
pub struct HermeticSessionBuilder {
    test_env: TestEnvironment,
    app_config: AppConfig,
    network_provider: MockNetworkProvider,
    interactive_provider: MockInteractiveProvider,
}

impl HermeticSessionBuilder {
    pub fn new() -> Result<Self> {
        let test_env = TestEnvironment::new()?;
        let app_config = AppConfig {
            workdir: Some(test_env.work_path.clone()),
            ..AppConfig::default()
        };

        Ok(Self {
            test_env,
            app_config,
            network_provider: MockNetworkProvider::new(),
            interactive_provider: MockInteractiveProvider::new(),
        })
    }

    /// Healthy toolchain reporting the given Node.js version
    pub fn with_toolchain(self, node_version: &str) -> Result<Self> {
        self.test_env.install_toolchain(node_version)?;
        Ok(self)
    }

    /// Replace (or add) a single mock executable
    pub fn with_mock_executable(self, name: &str, behavior: MockBehavior) -> Result<Self> {
        self.test_env.add_mock_executable(name, behavior)?;
        Ok(self)
    }

    pub fn with_project_file(self, relative: &str, content: &str) -> Result<Self> {
        self.test_env.write_project_file(relative, content)?;
        Ok(self)
    }

    pub fn with_project_dir(self, relative: &str) -> Result<Self> {
        self.test_env.create_project_dir(relative)?;
        Ok(self)
    }

    pub fn with_occupied_port(mut self, port: u16) -> Self {
        self.network_provider = self.network_provider.with_occupied_port(port);
        self
    }

    pub fn with_interactive(mut self, interactive: MockInteractiveProvider) -> Self {
        self.interactive_provider = interactive;
        self
    }

    pub fn test_env(&self) -> &TestEnvironment {
        &self.test_env
    }

    /// Build the session; only the environment's `bin/` is on PATH
    pub fn build(self) -> (HermeticSession, TestEnvironment) {
        let session = CommandSession::new_with_providers(
            LiveFileSystemProvider,
            self.network_provider,
            LiveProcessProvider::with_custom_path(self.test_env.bin_path.clone().into_os_string()),
            LiveConfigProvider::new(self.app_config),
            self.interactive_provider,
        );

        (session, self.test_env)
    }
}

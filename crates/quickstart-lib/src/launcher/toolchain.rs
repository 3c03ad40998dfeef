//! Executable names of the JavaScript toolchain

use crate::launcher::runner::Invocation;
use crate::platform::PlatformInfo;

/// Minimum supported Node.js major version
pub const MIN_RUNTIME_MAJOR: u64 = 18;

/// Where to get the runtime when it is missing or outdated
pub const RUNTIME_DOWNLOAD_URL: &str = "https://nodejs.org/";

/// Runtime, package manager and package runner executables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolchain {
    pub runtime: &'static str,
    pub package_manager: &'static str,
    pub package_runner: &'static str,
}

impl Toolchain {
    /// npm and npx ship as `.cmd` shims on Windows
    pub fn for_platform(platform: &PlatformInfo) -> Self {
        if platform.is_windows() {
            Self {
                runtime: "node",
                package_manager: "npm.cmd",
                package_runner: "npx.cmd",
            }
        } else {
            Self {
                runtime: "node",
                package_manager: "npm",
                package_runner: "npx",
            }
        }
    }

    pub fn detect() -> Self {
        Self::for_platform(&PlatformInfo::detect())
    }

    pub fn runtime_version(&self) -> Invocation {
        Invocation::new(self.runtime).arg("--version").capture()
    }

    pub fn package_manager_version(&self) -> Invocation {
        Invocation::new(self.package_manager)
            .arg("--version")
            .capture()
    }

    pub fn npm<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.package_manager).args(args)
    }

    /// `npx prisma ...`
    pub fn prisma<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.package_runner).arg("prisma").args(args)
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    include!("toolchain.test.rs");
}

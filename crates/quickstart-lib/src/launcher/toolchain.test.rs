use super::*;

fn linux() -> PlatformInfo {
    PlatformInfo {
        os: "linux",
        arch: "x86_64",
    }
}

fn windows() -> PlatformInfo {
    PlatformInfo {
        os: "windows",
        arch: "x86_64",
    }
}

#[test]
fn test_unix_tool_names() {
    let toolchain = Toolchain::for_platform(&linux());
    assert_eq!(toolchain.runtime, "node");
    assert_eq!(toolchain.package_manager, "npm");
    assert_eq!(toolchain.package_runner, "npx");
}

#[test]
fn test_windows_uses_cmd_shims() {
    let toolchain = Toolchain::for_platform(&windows());
    assert_eq!(toolchain.runtime, "node");
    assert_eq!(toolchain.package_manager, "npm.cmd");
    assert_eq!(toolchain.package_runner, "npx.cmd");
}

#[test]
fn test_version_queries_are_captured() {
    let toolchain = Toolchain::for_platform(&linux());

    let runtime = toolchain.runtime_version();
    assert_eq!(runtime.command_line(), "node --version");
    assert!(runtime.capture_output);
    assert!(toolchain.package_manager_version().capture_output);
}

#[test]
fn test_prisma_goes_through_package_runner() {
    let toolchain = Toolchain::for_platform(&windows());
    let invocation = toolchain.prisma(["db", "push"]);

    assert_eq!(invocation.command_line(), "npx.cmd prisma db push");
    assert!(invocation.check);
    assert!(!invocation.capture_output);
}

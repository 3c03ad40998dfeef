//! Command-line behaviour of the `quickstart` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quickstart() -> Command {
    let mut cmd = Command::cargo_bin("quickstart").unwrap();
    cmd.env_remove("QUICKSTART_PORT")
        .env_remove("QUICKSTART_WORKDIR")
        .env_remove("QUICKSTART_COLOR")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn version_flag_works() {
    quickstart()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quickstart"));
}

#[test]
fn help_lists_launch_flags() {
    quickstart()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-deps"))
        .stdout(predicate::str::contains("--force-seed"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn unknown_flag_exits_with_one() {
    quickstart().arg("--turbo").assert().code(1);
}

#[test]
fn port_zero_is_rejected() {
    quickstart().args(["--port", "0"]).assert().code(1);
}

#[test]
fn missing_workdir_is_an_unexpected_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    quickstart()
        .arg("--workdir")
        .arg(&missing)
        .arg("--check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR] Unexpected error"));
}

#[test]
fn check_without_node_fails() {
    let project = TempDir::new().unwrap();
    let empty_bin = TempDir::new().unwrap();

    quickstart()
        .env("PATH", empty_bin.path())
        .arg("--workdir")
        .arg(project.path())
        .arg("--check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[HEADER] Checking prerequisites"))
        .stdout(predicate::str::contains("[ERROR] Node.js is not installed!"))
        .stdout(predicate::str::contains("[ERROR] npm is not installed!"));

    assert!(!project.path().join(".env").exists());
}

#[cfg(unix)]
#[test]
fn interrupt_during_setup_is_a_clean_shutdown() {
    use assert_cmd::prelude::*;
    use std::io::{BufRead, BufReader, Read};
    use std::os::unix::fs::PermissionsExt;
    use std::process::Stdio;
    use std::time::Duration;

    let project = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let tools = [
        ("node", "echo v20.11.1"),
        (
            "npm",
            "case \"$1\" in\n  --version) echo 10.2.4 ;;\n  install) exec sleep 3 ;;\nesac",
        ),
    ];
    for (name, body) in tools {
        let path = bin.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\nPATH=\"/usr/bin:/bin\"\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let mut child = std::process::Command::cargo_bin("quickstart")
        .unwrap()
        .env_remove("QUICKSTART_PORT")
        .env_remove("QUICKSTART_WORKDIR")
        .env_remove("QUICKSTART_COLOR")
        .env("NO_COLOR", "1")
        .env("PATH", bin.path())
        .arg("--workdir")
        .arg(project.path())
        .arg("--setup")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut seen = String::new();
    loop {
        let mut line = String::new();
        if stdout.read_line(&mut line).unwrap() == 0 {
            break;
        }
        seen.push_str(&line);
        if line.contains("Installing dependencies...") {
            break;
        }
    }
    assert!(seen.contains("Installing dependencies..."), "{}", seen);

    // npm install is now blocking the pipeline
    std::thread::sleep(Duration::from_millis(300));
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }

    stdout.read_to_string(&mut seen).unwrap();
    let status = child.wait().unwrap();

    assert_eq!(status.code(), Some(0), "{}", seen);
    assert!(seen.contains("Shutting down..."), "{}", seen);
    assert!(!seen.contains("[ERROR]"), "{}", seen);
}

use super::*;
use crate::testing::{PROCESS_SIGNALS, TempDirFixture};
use std::net::TcpListener;

#[test]
fn test_process_output_helpers() {
    assert!(ProcessOutput::exited(0).success());
    assert!(!ProcessOutput::exited(2).success());

    let output = ProcessOutput::captured(0, "10.2.4\n", "");
    assert_eq!(output.stdout.as_deref(), Some("10.2.4\n"));
    assert!(
        !ProcessOutput {
            code: None,
            stdout: None,
            stderr: None
        }
        .success()
    );
}

#[test]
fn test_live_filesystem_round_trip() {
    let fixture = TempDirFixture::new().unwrap();
    let fs = LiveFileSystemProvider;
    let path = fixture.path().join(".env");

    assert!(!fs.exists(&path));
    fs.write_file(&path, "PORT=3000\n").unwrap();
    assert!(fs.exists(&path));
    assert!(!fs.is_directory(&path));
    assert!(fs.is_directory(fixture.path()));
    assert_eq!(fs.read_to_string(&path).unwrap(), "PORT=3000\n");

    fs.remove_file(&path).unwrap();
    assert!(!fs.exists(&path));
    assert!(fs.remove_file(&path).is_err());
}

#[test]
fn test_live_network_detects_listener() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();

    assert!(LiveNetworkProvider.is_port_in_use(port));
}

#[test]
fn test_live_network_free_port() {
    let port = {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        listener.local_addr().unwrap().port()
    };

    assert!(!LiveNetworkProvider.is_port_in_use(port));
}

#[test]
fn test_live_process_missing_program_fails_to_spawn() {
    let fixture = TempDirFixture::new().unwrap();
    let provider = LiveProcessProvider::with_custom_path(fixture.path().as_os_str().to_owned());

    assert_eq!(provider.find_program("node"), None);
    assert!(
        provider
            .execute(&Invocation::new("quickstart-no-such-tool").capture())
            .is_err()
    );
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(fixture: &TempDirFixture, name: &str, body: &str) -> PathBuf {
        let path = fixture
            .write_file(&format!("bin/{}", name), &format!("#!/bin/sh\n{}\n", body))
            .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_execute_captures_streams_and_env() {
        let fixture = TempDirFixture::new().unwrap();
        write_script(&fixture, "greet", "echo \"port=$PORT\"; echo oops >&2; exit 4");
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        let output = provider
            .execute(&Invocation::new("greet").env("PORT", "4321").capture())
            .unwrap();

        assert_eq!(output.code, Some(4));
        assert_eq!(output.stdout.as_deref(), Some("port=4321\n"));
        assert_eq!(output.stderr.as_deref(), Some("oops\n"));
    }

    #[test]
    fn test_execute_runs_in_working_dir() {
        let fixture = TempDirFixture::new().unwrap();
        write_script(&fixture, "where", "pwd");
        let project = fixture.create_dir("project").unwrap();
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        let output = provider
            .execute(&Invocation::new("where").capture().current_dir(&project))
            .unwrap();

        let reported = PathBuf::from(output.stdout.unwrap().trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            project.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_find_program_uses_custom_path() {
        let fixture = TempDirFixture::new().unwrap();
        let script = write_script(&fixture, "node", "echo v20.11.1");
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        assert_eq!(provider.find_program("node"), Some(script));
    }

    #[tokio::test]
    async fn test_supervise_reports_exit_code() {
        let _lock = PROCESS_SIGNALS.lock().await;
        let fixture = TempDirFixture::new().unwrap();
        write_script(&fixture, "server", "exit 3");
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        let exit = provider.supervise(&Invocation::new("server")).await.unwrap();
        assert_eq!(exit, ChildExit::Exited(Some(3)));
    }

    #[tokio::test]
    async fn test_supervise_treats_sigint_status_as_interrupt() {
        let _lock = PROCESS_SIGNALS.lock().await;
        let fixture = TempDirFixture::new().unwrap();
        write_script(&fixture, "server", "exit 130");
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        let exit = provider.supervise(&Invocation::new("server")).await.unwrap();
        assert_eq!(exit, ChildExit::Interrupted);
    }

    #[tokio::test]
    async fn test_stop_signal_terminates_child() {
        let _lock = PROCESS_SIGNALS.lock().await;
        let fixture = TempDirFixture::new().unwrap();
        write_script(
            &fixture,
            "server",
            "trap 'echo term > \"$MARKER\"; exit 143' TERM\nsleep 5 &\nwait",
        );
        let marker = fixture.path().join("stopped");
        let provider = LiveProcessProvider::new_for_test(Some(fixture.path().join("bin")));

        tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            unsafe {
                libc::kill(libc::getpid(), libc::SIGTERM);
            }
        });

        let started = std::time::Instant::now();
        let exit = provider
            .supervise(&Invocation::new("server").env("MARKER", marker.to_string_lossy()))
            .await
            .unwrap();

        assert_eq!(exit, ChildExit::Interrupted);
        assert!(started.elapsed() < std::time::Duration::from_secs(4));
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "term\n");
    }
}

use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::*;

const NETSTAT_TABLE: &str = "\
  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       4242
  TCP    0.0.0.0:30000          0.0.0.0:0              LISTENING       17
  TCP    127.0.0.1:3000         127.0.0.1:52110        ESTABLISHED     4242
  TCP    [::]:3000              [::]:0                 LISTENING       4242
";

#[test]
fn test_parse_port() {
    assert_eq!(parse_port("8080"), Some(8080));
    assert_eq!(parse_port(" 3001\n"), Some(3001));
    assert_eq!(parse_port("0"), None);
    assert_eq!(parse_port("70000"), None);
    assert_eq!(parse_port("abc"), None);
    assert_eq!(parse_port(""), None);
}

#[test]
fn test_netstat_filter_keeps_listening_rows_for_port() {
    let rows = NetstatInspector::filter_listening(NETSTAT_TABLE, 3000);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.contains(":3000 ")));
    assert!(rows.iter().all(|row| row.contains("LISTENING")));
}

#[test]
fn test_platform_inspector_selection() {
    let windows = PlatformInfo {
        os: "windows",
        arch: "x86_64",
    };
    let macos = PlatformInfo {
        os: "macos",
        arch: "aarch64",
    };
    assert_eq!(platform_inspector(&windows).name(), "netstat");
    assert_eq!(platform_inspector(&macos).name(), "lsof");
}

#[test]
fn test_lsof_listing() {
    let process = MockProcessProvider::new().with_result(
        "lsof",
        &["-i:3000"],
        Ok(ProcessOutput::captured(0, "COMMAND PID\nnode 4242\n", "")),
    );

    let listing = LsofInspector.listeners(&process, 3000).unwrap();
    assert!(listing.contains("node 4242"));
}

#[test]
fn test_listing_failures_are_ignored() {
    let process = MockProcessProvider::new().with_result(
        "lsof",
        &["-i:3000"],
        Err("No such file or directory".to_string()),
    );
    assert_eq!(LsofInspector.listeners(&process, 3000), None);

    let empty = MockProcessProvider::new().with_result(
        "lsof",
        &["-i:3000"],
        Ok(ProcessOutput::captured(1, "", "")),
    );
    assert_eq!(LsofInspector.listeners(&empty, 3000), None);
}

#[test]
fn test_free_port_needs_no_prompt() {
    let session = MockCommandSession::new();

    let port = negotiate_port(&session, &LsofInspector, 3000).unwrap();

    assert_eq!(port, 3000);
    assert!(session.interactive_provider.get_confirm_calls().is_empty());
    assert!(session.process_provider.get_calls().is_empty());
}

#[test]
fn test_declining_retry_cancels() {
    let session = MockCommandSession::new()
        .with_network(MockNetworkProvider::new().with_occupied_port(3000))
        .with_interactive(MockInteractiveProvider::new().with_confirm(false));

    let error = negotiate_port(&session, &LsofInspector, 3000).unwrap_err();

    assert!(matches!(error, StageError::Cancelled));
    assert!(
        session
            .display_provider
            .has_message("warning", "Port 3000 is already in use")
    );
}

#[test]
fn test_operator_supplied_port_is_used() {
    let session = MockCommandSession::new()
        .with_network(MockNetworkProvider::new().with_occupied_port(3000))
        .with_process(MockProcessProvider::new().with_result(
            "lsof",
            &["-i:3000"],
            Ok(ProcessOutput::captured(0, "node 4242 user 23u IPv6 TCP *:3000 (LISTEN)\n", "")),
        ))
        .with_interactive(
            MockInteractiveProvider::new()
                .with_confirm(true)
                .with_text_input("3001"),
        );

    let port = negotiate_port(&session, &LsofInspector, 3000).unwrap();

    assert_eq!(port, 3001);
    assert_eq!(session.network_provider.get_probed_ports(), vec![3000, 3001]);
    assert!(session.display_provider.has_message("detail", "node 4242"));
    let prompts = session.interactive_provider.get_text_input_calls();
    assert!(prompts[0].0.contains("current: 3000"));
}

#[test]
fn test_loop_rechecks_each_new_port() {
    let session = MockCommandSession::new()
        .with_network(
            MockNetworkProvider::new()
                .with_occupied_port(3000)
                .with_occupied_port(3001),
        )
        .with_interactive(
            MockInteractiveProvider::new()
                .with_confirm(true)
                .with_text_input("3001")
                .with_confirm(true)
                .with_text_input("3002"),
        );

    let port = negotiate_port(&session, &LsofInspector, 3000).unwrap();

    assert_eq!(port, 3002);
    assert_eq!(
        session.network_provider.get_probed_ports(),
        vec![3000, 3001, 3002]
    );
}

#[test]
fn test_non_numeric_input_cancels() {
    let session = MockCommandSession::new()
        .with_network(MockNetworkProvider::new().with_occupied_port(3000))
        .with_interactive(
            MockInteractiveProvider::new()
                .with_confirm(true)
                .with_text_input("eighty"),
        );

    let error = negotiate_port(&session, &LsofInspector, 3000).unwrap_err();

    assert!(matches!(error, StageError::InvalidPort { ref input } if input == "eighty"));
    assert!(error.is_cancellation());
}

#[test]
fn test_interrupted_prompt_cancels() {
    let session = MockCommandSession::new()
        .with_network(MockNetworkProvider::new().with_occupied_port(3000))
        .with_interactive(
            MockInteractiveProvider::new()
                .with_confirm(true)
                .with_text_input_error("interrupted"),
        );

    let error = negotiate_port(&session, &LsofInspector, 3000).unwrap_err();
    assert!(matches!(error, StageError::Cancelled));
}

#[test]
fn test_interrupted_retry_question_cancels() {
    let session = MockCommandSession::new()
        .with_network(MockNetworkProvider::new().with_occupied_port(3000))
        .with_interactive(MockInteractiveProvider::new().with_confirm_error("interrupted"));

    let error = negotiate_port(&session, &LsofInspector, 3000).unwrap_err();

    assert!(matches!(error, StageError::Cancelled));
    assert!(session.interactive_provider.get_text_input_calls().is_empty());
}

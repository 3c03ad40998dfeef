use super::*;
use crate::display::test_utils::create_test_capabilities;

#[test]
fn test_status_message_formatting() {
    let styling = StyleManager::new(&create_test_capabilities());
    let status = StatusDisplay::new(&styling);

    // Smoke test: every level renders without panicking
    status.info("using default config");
    status.success("done");
    status.warning("experimental feature");
    status.error("tool not found");
    status.header("Checking prerequisites");
    status.message("Plain message");
    status.blank();
    status.detail("COMMAND  PID\nnode     4242\n\n");
    status.banner("360 Feedback System");
}

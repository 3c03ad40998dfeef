use super::*;
use crate::display::test_utils::{create_test_capabilities, create_color_capabilities};

#[test]
fn test_plain_tags_without_color() {
    let styling = StyleManager::new(&create_test_capabilities());

    assert!(!styling.color_enabled());
    assert_eq!(styling.format_info("starting"), "[INFO] starting");
    assert_eq!(styling.format_success("done"), "[SUCCESS] done");
    assert_eq!(styling.format_warning("careful"), "[WARNING] careful");
    assert_eq!(styling.format_error("broken"), "[ERROR] broken");
    assert_eq!(styling.format_header("Stage"), "[HEADER] Stage");
}

#[test]
fn test_colored_tags_keep_message_plain() {
    let styling = StyleManager::new(&create_color_capabilities());
    let line = styling.format_error("broken");

    assert!(styling.color_enabled());
    assert!(line.contains("\u{1b}["));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with(" broken"));
}

#[test]
fn test_banner_ascii() {
    let styling = StyleManager::new(&create_test_capabilities());
    let [top, title, bottom] = styling.format_banner("360 Feedback System");

    assert_eq!(top, "=".repeat(60));
    assert_eq!(title, "360 Feedback System");
    assert_eq!(bottom, top);
}

#[test]
fn test_banner_unicode_prefix() {
    let styling = StyleManager::new(&create_color_capabilities());
    let [_, title, _] = styling.format_banner("360 Feedback System");

    assert!(title.contains("\u{1F680} 360 Feedback System"));
}

use super::*;
use crate::testing::TempDirFixture;
use std::ffi::{OsStr, OsString};

#[test]
fn test_platform_info_display() {
    let info = PlatformInfo {
        os: "linux",
        arch: "x86_64",
    };
    assert_eq!(info.to_string(), "linux x86_64");
    assert!(!info.is_windows());
}

#[test]
fn test_detect_matches_build_target() {
    let info = PlatformInfo::detect();
    assert_eq!(info.os, std::env::consts::OS);
    assert_eq!(info.is_windows(), cfg!(windows));
}

#[test]
fn test_program_missing_from_empty_path() {
    let fixture = TempDirFixture::new().unwrap();
    let search = OsString::from(fixture.path());

    let info = ProgramFinder::find_with_path("definitely-not-a-real-tool", Some(&search));
    assert!(!info.available);
    assert_eq!(info.path, None);
}

#[test]
fn test_no_search_path_finds_nothing() {
    let info = ProgramFinder::find_with_path("node", None);
    assert!(!info.available);
}

#[cfg(unix)]
#[test]
fn test_program_found_only_when_executable() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TempDirFixture::new().unwrap();
    let tool = fixture.write_file("node", "#!/bin/sh\necho v20.0.0\n").unwrap();
    let search = OsString::from(fixture.path());

    assert!(!ProgramFinder::find_with_path("node", Some(&search)).available);

    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    let info = ProgramFinder::find_with_path("node", Some(&search));
    assert!(info.available);
    assert_eq!(info.path, Some(tool));
}

#[test]
fn test_prepend_search_path_puts_dir_first() {
    let fixture = TempDirFixture::new().unwrap();
    let joined = prepend_search_path(fixture.path(), Some(OsStr::new("/usr/bin")));
    let parts: Vec<_> = std::env::split_paths(&joined).collect();

    assert_eq!(parts[0], fixture.path());
    assert_eq!(parts.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_find_uses_process_path() {
    let info = ProgramFinder::find("sh");
    assert!(info.available);
    assert_eq!(info.name, "sh");
}

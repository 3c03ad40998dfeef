//! Cross-platform program discovery
//!
//! Resolves executables against a search path the way the platform shell
//! would, so callers can probe tools without spawning them.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Program detection result
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    pub name: String,
    pub available: bool,
    /// Full path to program if found
    pub path: Option<PathBuf>,
}

/// Cross-platform program finder
pub struct ProgramFinder;

impl ProgramFinder {
    /// Look `program` up on the process search path
    pub fn find(program: &str) -> ProgramInfo {
        Self::find_with_path(program, env::var_os("PATH").as_deref())
    }

    /// Look `program` up on an explicit search path
    pub fn find_with_path(program: &str, search_path: Option<&OsStr>) -> ProgramInfo {
        let path = search_path.and_then(|paths| Self::find_program_path(program, paths));

        ProgramInfo {
            name: program.to_string(),
            available: path.is_some(),
            path,
        }
    }

    fn find_program_path(program: &str, search_path: &OsStr) -> Option<PathBuf> {
        // Names with a directory component are not searched
        if Path::new(program).components().count() > 1 {
            let candidate = PathBuf::from(program);
            return Self::is_executable(&candidate).then_some(candidate);
        }

        env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| Self::candidates(&dir, program))
            .find(|candidate| Self::is_executable(candidate))
    }

    #[cfg(windows)]
    fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
        let mut candidates = vec![dir.join(program)];

        // Try as-is first, then each PATHEXT extension
        if Path::new(program).extension().is_none() {
            let pathext: OsString =
                env::var_os("PATHEXT").unwrap_or_else(|| OsString::from(".COM;.EXE;.BAT;.CMD"));
            for ext in pathext.to_string_lossy().split(';').filter(|e| !e.is_empty()) {
                candidates.push(dir.join(format!("{}{}", program, ext.to_lowercase())));
            }
        }

        candidates
    }

    #[cfg(not(windows))]
    fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
        vec![dir.join(program)]
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(path: &Path) -> bool {
        path.is_file()
    }
}

/// Prepend `dir` to a search path using the platform separator
pub fn prepend_search_path(dir: &Path, existing: Option<&OsStr>) -> OsString {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = existing {
        paths.extend(env::split_paths(existing));
    }

    env::join_paths(paths).unwrap_or_else(|_| dir.as_os_str().to_os_string())
}

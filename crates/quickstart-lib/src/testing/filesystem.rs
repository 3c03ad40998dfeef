//! Temporary project directories for filesystem-touching tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn create_dir(&self, subdir: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dir_path = self.path().join(subdir);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write `content` to `file_path`, creating parent directories
    pub fn write_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    pub fn read_file(&self, file_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}

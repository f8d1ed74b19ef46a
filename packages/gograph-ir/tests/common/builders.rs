//! Temporary repository builder

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A repository tree on disk, removed when dropped
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` at `rel`, creating parent directories
    pub fn file(self, rel: &str, content: impl AsRef<str>) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content.as_ref()).expect("write fixture file");
        self
    }

    /// Write raw bytes at `rel`, creating parent directories
    pub fn bytes(self, rel: &str, content: &[u8]) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        self
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

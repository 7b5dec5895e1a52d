//! Shared temp-directory fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use tempfile::TempDir;

use crate::rule::{Comparator, Mode, Rule, Threshold};

pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root as a string, for building rule strings.
    pub fn root(&self) -> String {
        self.path().display().to_string()
    }

    /// Creates a file of `size` bytes, including parent directories.
    pub fn file(&self, relative_path: &str, size: usize) -> PathBuf {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, vec![b'x'; size]).expect("Failed to write file");
        path
    }

    pub fn dir(&self, relative_path: &str) -> PathBuf {
        let path = self.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    pub fn set_modified(&self, relative_path: &str, at: SystemTime) {
        filetime::set_file_mtime(
            self.path().join(relative_path),
            FileTime::from_system_time(at),
        )
        .expect("Failed to set modification time");
    }

    pub fn remove(&self, relative_path: &str) {
        fs::remove_file(self.path().join(relative_path)).expect("Failed to remove file");
    }

    /// Canonical paths of files in the tree, in the given order.
    pub fn canonical(&self, relative_paths: &[&str]) -> Vec<PathBuf> {
        relative_paths
            .iter()
            .map(|p| dunce::canonicalize(self.path().join(p)).expect("Failed to canonicalize"))
            .collect()
    }

    /// A rule over this tree built without going through the parser.
    pub fn rule(&self, mode: Mode, comparator: Comparator, threshold: Threshold) -> Rule {
        Rule {
            mode,
            search_dir: self.path().to_path_buf(),
            file_mask: r".*\.txt".to_string(),
            comparator,
            threshold,
            fail_if_not_found: false,
            comment: String::new(),
        }
    }
}

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the file-probe binary.
#[macro_export]
macro_rules! file_probe {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("file-probe"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file of `size` bytes in the temp directory.
    pub fn create_file(&self, relative_path: &str, size: usize) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, vec![b'x'; size]).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Backdates the modification time of a file.
    pub fn age_file(&self, relative_path: &str, age: Duration) {
        let mtime = filetime::FileTime::from_system_time(SystemTime::now() - age);
        filetime::set_file_mtime(self.dir.path().join(relative_path), mtime)
            .expect("Failed to set modification time");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Builds a rule string rooted at the temp directory.
    pub fn rule(
        &self,
        mode: &str,
        mask: &str,
        comparator: &str,
        threshold: &str,
        comment: &str,
    ) -> String {
        format!(
            "{mode}|{}/{mask}|{comparator}|{threshold}|{comment}",
            self.dir.path().display()
        )
    }

    /// Writes `.file-probe.toml` into the temp directory.
    pub fn create_config(&self, content: &str) {
        fs::write(self.dir.path().join(".file-probe.toml"), content)
            .expect("Failed to write config");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

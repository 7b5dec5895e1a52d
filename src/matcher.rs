use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ProbeError, Result};

/// Lists the files of one directory (non-recursive) whose path matches a file mask.
///
/// The mask is a case-insensitive regular expression searched anywhere in the file's
/// path. When it matches nothing, the mask is retried once as a literal string, so
/// `report.csv` still finds the file even though `.` is a metacharacter.
pub struct FileMatcher {
    search_dir: PathBuf,
    file_mask: String,
}

impl FileMatcher {
    #[must_use]
    pub fn new(search_dir: &Path, file_mask: &str) -> Self {
        Self {
            search_dir: search_dir.to_path_buf(),
            file_mask: file_mask.to_string(),
        }
    }

    /// Returns matching files in directory listing order.
    ///
    /// Paths are rooted at the canonical form of the search directory, so the same
    /// file yields the same path across calls however the directory was written.
    ///
    /// # Errors
    /// Returns `InvalidPattern` when the mask is not a valid regular expression.
    pub fn matching_files(&self) -> Result<Vec<PathBuf>> {
        let regex = self.compile(&self.file_mask)?;
        let entries = self.list_files();

        let files = filter_entries(&entries, &regex);
        if !files.is_empty() {
            return Ok(files);
        }

        let literal = regex::escape(self.file_mask.trim_start_matches('\\'));
        let regex = self.compile(&literal)?;
        let files = filter_entries(&entries, &regex);
        if !files.is_empty() {
            debug!(mask = %self.file_mask, matched = files.len(), "file mask matched literally");
        }
        Ok(files)
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ProbeError::InvalidPattern {
                pattern: pattern.to_string(),
                search_dir: self.search_dir.clone(),
                source,
            })
    }

    fn list_files(&self) -> Vec<PathBuf> {
        let root =
            dunce::canonicalize(&self.search_dir).unwrap_or_else(|_| self.search_dir.clone());

        WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

fn filter_entries(entries: &[PathBuf], regex: &Regex) -> Vec<PathBuf> {
    entries
        .iter()
        .filter(|path| regex.is_match(&path.to_string_lossy()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;

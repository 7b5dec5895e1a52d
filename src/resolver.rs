//! Splits a rule path into an existing base directory and a file-name pattern.
//!
//! Any segment of the path may be a regular expression, and literal directory names
//! may contain regex metacharacters (`v1.2`). Segments are peeled off the end of the
//! path until the remaining prefix is an existing directory; everything after that
//! prefix becomes the file mask. Both `/` and `\` count as separators.

use std::path::PathBuf;

use crate::error::RuleError;

/// Base directory plus the pattern for entries inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub search_dir: PathBuf,
    pub file_mask: String,
}

/// Resolve `path` into an existing search directory and a file mask.
///
/// # Errors
/// Returns `DirectoryNotFound` when no prefix of `path` is an existing directory.
pub fn resolve(path: &str) -> Result<ResolvedPath, RuleError> {
    let mut dir = directory_portion(path);

    while !dir.is_empty() && !native_path(dir).is_dir() {
        dir = directory_portion(dir);
    }

    if dir.is_empty() {
        return Err(RuleError::DirectoryNotFound {
            path: directory_portion(path).to_string(),
        });
    }

    let remainder = &path[dir.len()..];
    let file_mask = remainder
        .strip_prefix(is_separator)
        .unwrap_or(remainder)
        .to_string();

    Ok(ResolvedPath {
        search_dir: native_path(dir),
        file_mask,
    })
}

const fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// `path` without its final separator-delimited segment; empty when nothing is left.
///
/// A leading separator on its own is kept as the root directory.
fn directory_portion(path: &str) -> &str {
    match path.rfind(is_separator) {
        None => "",
        Some(0) if path.len() == 1 => "",
        Some(idx) => {
            let head = path[..idx].trim_end_matches(is_separator);
            if head.is_empty() { &path[..1] } else { head }
        }
    }
}

/// Convert a path written with either separator convention into a native path.
fn native_path(dir: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(dir)
    } else {
        PathBuf::from(dir.replace('\\', "/"))
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

//! Cross-call bookkeeping for TRACE rules.
//!
//! Maps a matched file to the moment the probe first saw it. Entries disappear as
//! soon as the file drops out of the match set, so a file that vanishes and comes back
//! starts a fresh clock.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub first_observed: SystemTime,
}

#[derive(Debug, Clone, Default)]
pub struct TraceStore {
    entries: HashMap<PathBuf, TraceEntry>,
}

impl TraceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&TraceEntry> {
        self.entries.get(path)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry whose path is not in `present`. Returns how many were dropped.
    pub fn retain_present(&mut self, present: &[PathBuf]) -> usize {
        let present: HashSet<&Path> = present.iter().map(PathBuf::as_path).collect();
        let before = self.entries.len();
        self.entries.retain(|path, _| present.contains(path.as_path()));
        before - self.entries.len()
    }

    /// Record a sighting of `path` at `now`.
    ///
    /// Returns `None` on the first sighting, otherwise the time elapsed since then.
    pub fn observe(&mut self, path: &Path, now: SystemTime) -> Option<Duration> {
        if let Some(entry) = self.entries.get(path) {
            return Some(now.duration_since(entry.first_observed).unwrap_or_default());
        }

        self.entries.insert(
            path.to_path_buf(),
            TraceEntry {
                first_observed: now,
            },
        );
        None
    }
}

//! Per-mode evaluation of matched files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::rule::{Comparator, Mode, Rule};
use crate::trace::TraceStore;
use crate::verdict::{Outcome, SubResult};

/// A matched file as seen at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObservation {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub last_modified: SystemTime,
    /// `now - last_modified`, clamped at zero for timestamps in the future.
    pub age: Duration,
}

impl FileObservation {
    /// Stat `path` and derive its age relative to `now`.
    ///
    /// # Errors
    /// Returns the I/O error when the file cannot be inspected, e.g. because it was
    /// removed after the directory was listed.
    pub fn read(path: &Path, now: SystemTime) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let last_modified = metadata.modified()?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            last_modified,
            age: now.duration_since(last_modified).unwrap_or_default(),
        })
    }
}

/// Aggregate outcome plus one sub-result per file that could be inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub sub_results: Vec<SubResult>,
}

/// Evaluate `rule` over `files`, consulting and updating `trace` for TRACE rules.
///
/// Files that vanish between listing and inspection are skipped and do not affect
/// the outcome; they still count towards the COUNT total.
pub fn evaluate_files(
    rule: &Rule,
    files: &[PathBuf],
    trace: &mut TraceStore,
    now: SystemTime,
) -> Evaluation {
    if rule.mode == Mode::Trace {
        let removed = trace.retain_present(files);
        if removed > 0 {
            debug!(removed, "dropped traced files that no longer match");
        }
    }

    let mut all_passed = true;
    let mut sub_results = Vec::with_capacity(files.len());

    for path in files {
        let observation = match FileObservation::read(path, now) {
            Ok(observation) => observation,
            Err(e) => {
                debug!(
                    path = %path.display(),
                    error = %e,
                    "skipping file that could not be inspected"
                );
                continue;
            }
        };

        let (passed, file_age) = check_file(rule, &observation, trace, now);
        all_passed &= passed;
        sub_results.push(SubResult {
            result: Outcome::from_bool(passed),
            file_name: observation.name,
            file_size: observation.size,
            file_age,
        });
    }

    let passed = match rule.mode {
        Mode::Count => {
            let count = u64::try_from(files.len()).unwrap_or(u64::MAX);
            rule.comparator.holds(count, rule.count_threshold())
        }
        Mode::Size | Mode::Age if files.is_empty() => passes_without_files(rule),
        Mode::Size | Mode::Age | Mode::Trace => all_passed,
    };

    Evaluation {
        outcome: Outcome::from_bool(passed),
        sub_results,
    }
}

/// Per-file check. Returns whether the file passes and the age to report for it.
fn check_file(
    rule: &Rule,
    observation: &FileObservation,
    trace: &mut TraceStore,
    now: SystemTime,
) -> (bool, Duration) {
    match rule.mode {
        Mode::Count => (true, observation.age),
        Mode::Size => (
            rule.comparator.holds(observation.size, rule.count_threshold()),
            observation.age,
        ),
        Mode::Age => (
            rule.comparator.holds(observation.age, rule.age_threshold()),
            observation.age,
        ),
        // first sighting never fails
        Mode::Trace => trace.observe(&observation.path, now).map_or(
            (true, Duration::ZERO),
            |elapsed| (rule.comparator.holds(elapsed, rule.age_threshold()), elapsed),
        ),
    }
}

/// SIZE and AGE with nothing matched: "smaller/younger than" holds vacuously unless
/// the rule demands that files exist.
const fn passes_without_files(rule: &Rule) -> bool {
    matches!(rule.comparator, Comparator::Less) && !rule.fail_if_not_found
}

#[cfg(test)]
#[path = "metric_tests.rs"]
mod tests;

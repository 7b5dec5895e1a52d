use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::rule::{Comparator, Mode, Rule, Threshold, format_duration, serialize_secs};

/// Tri-state outcome of a rule or of one matched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    /// The rule was parsed but gave nothing to evaluate (no file mask).
    Indeterminate,
}

impl Outcome {
    #[must_use]
    pub const fn from_bool(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASSED",
            Self::Fail => "FAILED",
            Self::Indeterminate => "INDETERMINATE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-file line of a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubResult {
    pub result: Outcome,
    pub file_name: String,
    pub file_size: u64,
    /// Time since last write, or time under observation for TRACE rules.
    #[serde(serialize_with = "serialize_secs")]
    pub file_age: Duration,
}

impl fmt::Display for SubResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}: {}, {}",
            self.result,
            self.file_name,
            self.file_size,
            format_duration(self.file_age)
        )
    }
}

/// Structured result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub result: Outcome,
    pub mode: Mode,
    pub search_dir: PathBuf,
    pub file_mask: String,
    pub comparator: Comparator,
    pub threshold: Threshold,
    pub fail_if_not_found: bool,
    pub matched_count: usize,
    pub sub_results: Vec<SubResult>,
    pub comment: String,
}

impl Verdict {
    #[must_use]
    pub fn new(
        rule: Rule,
        result: Outcome,
        matched_count: usize,
        sub_results: Vec<SubResult>,
    ) -> Self {
        Self {
            result,
            mode: rule.mode,
            search_dir: rule.search_dir,
            file_mask: rule.file_mask,
            comparator: rule.comparator,
            threshold: rule.threshold,
            fail_if_not_found: rule.fail_if_not_found,
            matched_count,
            sub_results,
            comment: rule.comment,
        }
    }

    #[must_use]
    pub fn indeterminate(rule: Rule) -> Self {
        Self::new(rule, Outcome::Indeterminate, 0, Vec::new())
    }

    /// Everything after the header line: mode, path summary, match count, sub-results.
    ///
    /// # Errors
    /// Propagates errors of the underlying writer.
    pub fn write_details(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let marker = if self.fail_if_not_found { "!" } else { "" };
        writeln!(out, "Mode {}", self.mode)?;
        writeln!(
            out,
            "Path {}+{} {}{} {}",
            self.search_dir.display(),
            self.file_mask,
            self.comparator,
            marker,
            self.threshold
        )?;
        writeln!(out, "Matched {}", self.matched_count)?;
        for sub_result in &self.sub_results {
            writeln!(out, "    {sub_result}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.result, self.comment)?;
        self.write_details(f)
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;

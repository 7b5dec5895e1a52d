//! Rule model and the `MODE|PATH|COMPARATOR[!]|THRESHOLD|COMMENT` parser.

mod duration;
mod parse;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

pub use duration::{format_duration, parse_rule_duration};
pub(crate) use duration::serialize_secs;

use crate::error::RuleError;

/// The metric family a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Byte size of every matched file.
    Size,
    /// Number of matched files.
    Count,
    /// Time since each matched file was last written.
    Age,
    /// Time each matched file has been continuously observed by the probe.
    Trace,
}

impl Mode {
    /// Looks up a mode keyword, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_uppercase().as_str() {
            "SIZE" => Some(Self::Size),
            "COUNT" => Some(Self::Count),
            "AGE" => Some(Self::Age),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Size => "SIZE",
            Self::Count => "COUNT",
            Self::Age => "AGE",
            Self::Trace => "TRACE",
        }
    }

    /// Whether the threshold of this mode is a duration rather than an integer.
    #[must_use]
    pub const fn uses_age_threshold(self) -> bool {
        matches!(self, Self::Age | Self::Trace)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relational operator between an observed value and the threshold.
///
/// The rule parser only produces `Less` and `Greater`. `Equal` is honoured by every
/// comparison but can only be reached by building a [`Rule`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "=")]
    Equal,
}

impl Comparator {
    /// Returns true when `observed <comparator> threshold` holds.
    #[must_use]
    pub fn holds<T: PartialOrd>(self, observed: T, threshold: T) -> bool {
        match self {
            Self::Less => observed < threshold,
            Self::Greater => observed > threshold,
            Self::Equal => observed == threshold,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Critical value of a rule. Which variant is present follows from the rule's [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// Bytes for SIZE, files for COUNT.
    Count(u64),
    /// Maximum or minimum age for AGE and TRACE, serialized as whole seconds.
    Age(#[serde(serialize_with = "duration::serialize_secs")] Duration),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Age(age) => f.write_str(&format_duration(*age)),
        }
    }
}

/// A validated rule, rebuilt from the rule string on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub mode: Mode,
    pub search_dir: PathBuf,
    pub file_mask: String,
    pub comparator: Comparator,
    pub threshold: Threshold,
    pub fail_if_not_found: bool,
    pub comment: String,
}

impl Rule {
    /// Parses a rule string and resolves its directory against the filesystem.
    ///
    /// # Errors
    /// Returns a [`RuleError`] when a field is missing or malformed, or when no
    /// existing base directory can be found in the path.
    pub fn parse(input: &str) -> Result<Self, RuleError> {
        parse::parse_rule(input)
    }

    /// Integer threshold for SIZE and COUNT rules; zero for duration thresholds.
    #[must_use]
    pub const fn count_threshold(&self) -> u64 {
        match self.threshold {
            Threshold::Count(count) => count,
            Threshold::Age(_) => 0,
        }
    }

    /// Duration threshold for AGE and TRACE rules; zero for integer thresholds.
    #[must_use]
    pub const fn age_threshold(&self) -> Duration {
        match self.threshold {
            Threshold::Age(age) => age,
            Threshold::Count(_) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

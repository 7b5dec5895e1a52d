mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::EvalProgress;
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;
use crate::verdict::Verdict;

/// A verdict together with the rule that produced it.
#[derive(Debug, Clone)]
pub struct RuleReport {
    pub name: Option<String>,
    pub rule: String,
    pub verdict: Verdict,
}

/// Trait for formatting verdicts into various output formats.
pub trait OutputFormatter {
    /// Format the reports into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, reports: &[RuleReport]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

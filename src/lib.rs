pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod metric;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod rule;
pub mod trace;
pub mod verdict;

#[cfg(test)]
mod test_fixtures;

pub use error::{ProbeError, Result, RuleError};
pub use evaluator::{Evaluator, EvaluatorOptions};
pub use rule::{Comparator, Mode, Rule, Threshold};
pub use verdict::{Outcome, SubResult, Verdict};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RULE_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_INDETERMINATE: i32 = 3;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

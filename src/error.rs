use std::path::PathBuf;

use thiserror::Error;

/// Grammar reminder appended to every rule configuration error.
pub const RULE_SYNTAX: &str = "\
Rule: MODE|PATH|COMPARATOR[!]|THRESHOLD|COMMENT
MODE: SIZE=file size, COUNT=number of files, AGE=time since last write, TRACE=time observed by the probe
PATH: directory followed by a regular expression for file names
COMPARATOR: < or >, append ! to fail when no file matches
THRESHOLD: integer for SIZE/COUNT, UNIT:value tokens for AGE/TRACE
UNIT: S=seconds, M=minutes, H=hours, D=days
Example: TRACE|\\\\server\\share\\.*\\.ext|<|M:10|Fails if any matching file is older than 10 minutes.";

/// A rule string that can never be evaluated until it changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid rule: {reason}\n{}", RULE_SYNTAX)]
    InvalidRule { reason: String },

    #[error("Directory not found: {path}\n{}", RULE_SYNTAX)]
    DirectoryNotFound { path: String },
}

impl RuleError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            reason: reason.into(),
        }
    }

    /// The short description without the grammar help.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidRule { reason } => reason.clone(),
            Self::DirectoryNotFound { path } => format!("directory not found: {path}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Invalid file mask {pattern} in {}", search_dir.display())]
    InvalidPattern {
        pattern: String,
        search_dir: PathBuf,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl ProbeError {
    /// Short category label, used by structured log events.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Rule(_) => "Rule",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Config(_) => "Config",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

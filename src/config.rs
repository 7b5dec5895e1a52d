//! Optional `.file-probe.toml` holding rules and polling settings.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evaluator::EvaluatorOptions;
use crate::rule::parse_rule_duration;
use crate::{ProbeError, Result};

pub const CONFIG_FILENAME: &str = ".file-probe.toml";

/// Poll interval of `watch` when neither config nor CLI sets one.
pub const DEFAULT_INTERVAL: &str = "S:5";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProbeSettings {
    /// Poll interval for `watch`: integer seconds or `UNIT:value` tokens.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Surface invalid file masks as errors instead of failing verdicts.
    #[serde(default)]
    pub propagate_pattern_errors: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            propagate_pattern_errors: false,
        }
    }
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

/// One rule string with an optional display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub rule: String,
}

impl RuleEntry {
    #[must_use]
    pub fn unnamed(rule: &str) -> Self {
        Self {
            name: None,
            rule: rule.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or has an
    /// invalid interval or an empty rule.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProbeError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.file-probe.toml` from `dir` if it exists.
    ///
    /// # Errors
    /// Same as [`Self::load`] for an existing file.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// # Errors
    /// Returns an error when the interval is malformed or zero.
    pub fn interval(&self) -> Result<Duration> {
        parse_interval(&self.probe.interval)
    }

    #[must_use]
    pub const fn evaluator_options(&self) -> EvaluatorOptions {
        EvaluatorOptions {
            propagate_pattern_errors: self.probe.propagate_pattern_errors,
        }
    }

    fn validate(&self) -> Result<()> {
        self.interval()?;
        for (i, entry) in self.rules.iter().enumerate() {
            if entry.rule.trim().is_empty() {
                return Err(ProbeError::Config(format!("rules[{i}].rule cannot be empty")));
            }
        }
        Ok(())
    }
}

/// Parse a poll interval: a bare integer is seconds, otherwise the rule duration grammar.
///
/// # Errors
/// Returns an error for malformed input or a zero interval.
pub fn parse_interval(input: &str) -> Result<Duration> {
    let input = input.trim();
    let interval = match input.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => parse_rule_duration(input).map_err(|e| {
            ProbeError::Config(format!("Invalid interval '{input}': {}", e.reason()))
        })?,
    };

    if interval.is_zero() {
        return Err(ProbeError::Config(format!(
            "Invalid interval '{input}': must be greater than zero (e.g. 5, S:30, M:1)"
        )));
    }
    Ok(interval)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

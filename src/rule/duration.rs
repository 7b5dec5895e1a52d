//! Duration grammar of rule thresholds: `UNIT:value` tokens added together.
//!
//! Units are `S`, `M`, `H` and `D` (case-insensitive), e.g. `M:10` or `D:1H:12`.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serializer;

use crate::error::RuleError;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_DAY: u64 = 86400;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z]+)\s*:\s*(\d*)").expect("Invalid regex"));

/// Parse every `UNIT:value` token in `input` and add them up.
///
/// Text that contains no token at all yields a zero duration.
///
/// # Errors
/// Returns an error for an unknown unit, a missing or non-numeric value, or a sum
/// that does not fit into a `u64` number of seconds.
pub fn parse_rule_duration(input: &str) -> Result<Duration, RuleError> {
    let mut total: u64 = 0;

    for caps in TOKEN_PATTERN.captures_iter(input) {
        let unit = caps[1].to_uppercase();
        let multiplier = match unit.as_str() {
            "S" => 1,
            "M" => SECONDS_PER_MINUTE,
            "H" => SECONDS_PER_HOUR,
            "D" => SECONDS_PER_DAY,
            _ => {
                return Err(RuleError::invalid(format!(
                    "unknown time unit '{unit}', expected S, M, H or D"
                )));
            }
        };

        let value: u64 = caps[2].parse().map_err(|_| {
            RuleError::invalid(format!("missing or invalid value for time unit {unit}"))
        })?;

        total = value
            .checked_mul(multiplier)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| RuleError::invalid(format!("duration '{input}' is too large")))?;
    }

    Ok(Duration::from_secs(total))
}

/// Render a duration as `{d}d:{h}h:{m}m:{s}s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let days = secs / SECONDS_PER_DAY;
    let hours = secs % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = secs % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    let seconds = secs % SECONDS_PER_MINUTE;
    format!("{days}d:{hours}h:{minutes}m:{seconds}s")
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's serialize_with signature
pub(crate) fn serialize_secs<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

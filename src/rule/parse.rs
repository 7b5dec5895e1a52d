use super::{Comparator, Mode, Rule, Threshold, parse_rule_duration};
use crate::error::RuleError;
use crate::resolver;

const FIELD_COUNT: usize = 5;
const FIELD_SEPARATOR: char = '|';
const FAIL_IF_NOT_FOUND_MARKER: char = '!';

pub(super) fn parse_rule(input: &str) -> Result<Rule, RuleError> {
    let fields: Vec<&str> = input.splitn(FIELD_COUNT, FIELD_SEPARATOR).collect();
    let field = |index: usize| fields.get(index).copied().unwrap_or("");

    let mode = Mode::from_keyword(field(0))
        .ok_or_else(|| RuleError::invalid("missing or unknown mode"))?;

    let path = field(1).trim();
    if path.is_empty() {
        return Err(RuleError::invalid("missing path"));
    }

    let (comparator, fail_if_not_found) = parse_comparator(field(2))?;
    let threshold = parse_threshold(mode, field(3))?;
    let resolved = resolver::resolve(path)?;

    Ok(Rule {
        mode,
        search_dir: resolved.search_dir,
        file_mask: resolved.file_mask,
        comparator,
        threshold,
        fail_if_not_found,
        comment: field(4).to_string(),
    })
}

fn parse_comparator(field: &str) -> Result<(Comparator, bool), RuleError> {
    let field = field.trim();
    let symbol = field.trim_end_matches(FAIL_IF_NOT_FOUND_MARKER);
    let fail_if_not_found = symbol.len() != field.len();

    let comparator = match symbol {
        "<" => Comparator::Less,
        ">" => Comparator::Greater,
        _ => return Err(RuleError::invalid("invalid comparator")),
    };

    Ok((comparator, fail_if_not_found))
}

/// SIZE and COUNT take a non-negative integer, AGE and TRACE take `UNIT:value` tokens.
/// An empty field means zero for either kind.
///
/// A SIZE or COUNT field that is not an integer still goes through the duration grammar
/// so malformed tokens are reported; whatever it holds, the count threshold is zero.
fn parse_threshold(mode: Mode, field: &str) -> Result<Threshold, RuleError> {
    let field = field.trim();

    if mode.uses_age_threshold() {
        if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RuleError::invalid(format!(
                "{mode} threshold needs UNIT:value tokens, got bare number '{field}'"
            )));
        }
        return parse_rule_duration(field).map(Threshold::Age);
    }

    if let Ok(count) = field.parse::<u64>() {
        return Ok(Threshold::Count(count));
    }

    if field
        .strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(RuleError::invalid(format!(
            "{mode} threshold must be non-negative, got '{field}'"
        )));
    }

    parse_rule_duration(field)?;
    Ok(Threshold::Count(0))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

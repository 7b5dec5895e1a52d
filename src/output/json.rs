use serde::Serialize;

use crate::error::Result;
use crate::verdict::Verdict;

use super::{OutputFormatter, RuleReport};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    verdicts: Vec<JsonReport<'a>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    rule: &'a str,
    #[serde(flatten)]
    verdict: &'a Verdict,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[RuleReport]) -> Result<String> {
        let output = JsonOutput {
            verdicts: reports
                .iter()
                .map(|r| JsonReport {
                    name: r.name.as_deref(),
                    rule: &r.rule,
                    verdict: &r.verdict,
                })
                .collect(),
        };

        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

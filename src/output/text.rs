use std::fmt::Write;

use crate::error::Result;
use crate::verdict::Outcome;

use super::{OutputFormatter, RuleReport};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Pass => "✓",
            Outcome::Fail => "✗",
            Outcome::Indeterminate => "?",
        }
    }

    fn colorize(&self, outcome: Outcome) -> String {
        if !self.use_colors {
            return outcome.to_string();
        }

        let color = match outcome {
            Outcome::Pass => ansi::GREEN,
            Outcome::Fail => ansi::RED,
            Outcome::Indeterminate => ansi::YELLOW,
        };
        format!("{color}{outcome}{}", ansi::RESET)
    }

    fn format_report(&self, report: &RuleReport, output: &mut String) {
        let verdict = &report.verdict;
        let icon = Self::status_icon(verdict.result);

        let _ = writeln!(
            output,
            "{icon} {} ({})",
            self.colorize(verdict.result),
            verdict.comment
        );
        if let Some(name) = &report.name {
            let _ = writeln!(output, "Name {name}");
        }
        let _ = verdict.write_details(output);
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[RuleReport]) -> Result<String> {
        let mut output = String::new();

        for report in reports {
            self.format_report(report, &mut output);
            output.push('\n');
        }

        let (passed, failed, indeterminate) =
            reports
                .iter()
                .fold((0, 0, 0), |(p, f, i), r| match r.verdict.result {
                    Outcome::Pass => (p + 1, f, i),
                    Outcome::Fail => (p, f + 1, i),
                    Outcome::Indeterminate => (p, f, i + 1),
                });

        let _ = writeln!(
            output,
            "Summary: {} rules evaluated, {passed} passed, {failed} failed, {indeterminate} indeterminate",
            reports.len()
        );

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

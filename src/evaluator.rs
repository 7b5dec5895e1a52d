//! The probe boundary: `evaluate(rule string) -> Verdict`.
//!
//! An [`Evaluator`] is meant to live across polls. It owns the TRACE bookkeeping and
//! remembers the last rule string, so history survives only while the rule string
//! stays the same. Calls take `&mut self`; sharing one evaluator between threads needs
//! external serialization.

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ProbeError, Result, RuleError};
use crate::matcher::FileMatcher;
use crate::metric;
use crate::progress::{PROGRESS_DONE, PROGRESS_PARSED, PROGRESS_STARTED, ProgressObserver};
use crate::rule::Rule;
use crate::trace::TraceStore;
use crate::verdict::{Outcome, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Return `InvalidPattern` instead of degrading to a failing verdict.
    pub propagate_pattern_errors: bool,
}

pub struct Evaluator<C: Clock = SystemClock> {
    clock: C,
    options: EvaluatorOptions,
    trace: TraceStore,
    last_rule: Option<String>,
    /// Rule string that produced a configuration error, and that error.
    fatal: Option<(String, RuleError)>,
}

impl Default for Evaluator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> Evaluator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            options: EvaluatorOptions::default(),
            trace: TraceStore::new(),
            last_rule: None,
            fatal: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn trace(&self) -> &TraceStore {
        &self.trace
    }

    /// Evaluate `rule` once against the filesystem.
    ///
    /// # Errors
    /// Returns the rule's configuration error; the same error is returned again for
    /// every later call with the identical rule string. With
    /// `propagate_pattern_errors`, an invalid file mask is returned as `InvalidPattern`.
    pub fn evaluate(&mut self, rule: &str) -> Result<Verdict> {
        self.evaluate_with_progress(rule, &mut |_: u8| {})
    }

    /// Like [`Self::evaluate`], reporting 0, 50 and 100 percent to `progress`.
    ///
    /// # Errors
    /// See [`Self::evaluate`].
    pub fn evaluate_with_progress(
        &mut self,
        rule: &str,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Verdict> {
        if let Some((_, err)) = self.fatal.as_ref().filter(|(failed, _)| failed == rule) {
            return Err(err.clone().into());
        }

        progress.on_progress(PROGRESS_STARTED);
        self.track_rule_identity(rule);

        let parsed = Rule::parse(rule).map_err(|err| {
            self.fatal = Some((rule.to_string(), err.clone()));
            ProbeError::from(err)
        })?;

        progress.on_progress(PROGRESS_PARSED);
        let verdict = self.check(parsed)?;
        progress.on_progress(PROGRESS_DONE);

        Ok(verdict)
    }

    /// A different rule string invalidates all TRACE history.
    fn track_rule_identity(&mut self, rule: &str) {
        if self.last_rule.as_deref() == Some(rule) {
            return;
        }
        if !self.trace.is_empty() {
            debug!(entries = self.trace.len(), "rule changed, clearing trace history");
        }
        self.trace.clear();
        self.fatal = None;
        self.last_rule = Some(rule.to_string());
    }

    fn check(&mut self, rule: Rule) -> Result<Verdict> {
        if rule.file_mask.is_empty() {
            return Ok(Verdict::indeterminate(rule));
        }

        let now = self.clock.now();
        let matcher = FileMatcher::new(&rule.search_dir, &rule.file_mask);

        let (files, pattern_failed) = match matcher.matching_files() {
            Ok(files) => (files, false),
            Err(err @ ProbeError::InvalidPattern { .. })
                if !self.options.propagate_pattern_errors =>
            {
                warn!(error = %err, "invalid file mask, treating as no match");
                (Vec::new(), true)
            }
            Err(err) => return Err(err),
        };

        let evaluation = metric::evaluate_files(&rule, &files, &mut self.trace, now);
        let result = if pattern_failed {
            Outcome::Fail
        } else {
            evaluation.outcome
        };

        Ok(Verdict::new(rule, result, files.len(), evaluation.sub_results))
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;

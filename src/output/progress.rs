use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::progress::{PROGRESS_DONE, ProgressObserver};

/// Terminal progress bar for one rule evaluation.
///
/// The bar is disabled in quiet mode or when stderr is not a TTY.
pub struct EvalProgress {
    progress_bar: ProgressBar,
}

impl EvalProgress {
    /// Creates a progress bar labelled with `label`, drawn on stderr.
    ///
    /// # Panics
    ///
    /// This function will panic if the progress bar template is invalid.
    /// The template is a compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(label: &str, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(label, quiet, is_tty)
    }

    /// Allows testing the visible progress bar path in non-TTY environments.
    fn new_with_visibility(label: &str, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar(label)
        };

        Self { progress_bar }
    }

    fn create_visible_progress_bar(label: &str) -> ProgressBar {
        let pb = ProgressBar::new(u64::from(PROGRESS_DONE));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {percent}%")
                // SAFETY: Template is a static string with valid format specifiers
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb.set_message(label.to_string());
        pb
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }
}

impl ProgressObserver for EvalProgress {
    fn on_progress(&mut self, percent: u8) {
        self.progress_bar.set_position(u64::from(percent));
        if percent >= PROGRESS_DONE {
            self.finish();
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;

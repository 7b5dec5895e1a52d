/// Reported before the rule string is parsed.
pub const PROGRESS_STARTED: u8 = 0;
/// Reported after parsing, before the directory is scanned.
pub const PROGRESS_PARSED: u8 = 50;
/// Reported once the verdict is built.
pub const PROGRESS_DONE: u8 = 100;

/// Receives advisory progress percentages during an evaluation.
pub trait ProgressObserver {
    fn on_progress(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent);
    }
}

//! Per-file progress reporting
//!
//! The organizer ticks a [`ProgressSink`] once per candidate file, success
//! or failure alike. Progress is a side effect, not part of the batch
//! report.

use indicatif::{ProgressBar, ProgressStyle};

/// Receiver for per-file progress updates during a batch
pub trait ProgressSink {
    /// Called once before the first file of a batch.
    fn begin(&mut self, total: usize, label: &str);

    /// Called after each file is handled, whatever the outcome.
    fn advance(&mut self);

    /// Called once after the last file of a batch.
    fn finish(&mut self);
}

/// Terminal progress bar, one per extension group
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for ConsoleProgress {
    fn begin(&mut self, total: usize, label: &str) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        bar.set_message(format!("Processing {label}"));
        self.bar = Some(bar);
    }

    fn advance(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// Sink that discards all updates, for tests and non-interactive callers
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn begin(&mut self, _total: usize, _label: &str) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}

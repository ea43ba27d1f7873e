//! Spinner display for reconciliation passes.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lan_games_sync::SyncProgress;

/// Shows the current sync phase on a single spinner line.
pub(crate) struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { pb }
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl SyncProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_game(&self, current: usize, total: usize, name: &str) {
        self.pb.set_message(format!("[{}/{}] {}", current, total, name));
    }

    fn on_complete(&self, _message: &str) {
        self.pb.finish_and_clear();
    }
}

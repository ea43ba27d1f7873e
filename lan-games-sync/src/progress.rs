//! Sync progress reporting.

/// Trait for receiving progress updates during a reconciliation pass.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Searching IGDB for 3 new games").
    fn on_phase(&self, message: &str);

    /// Called after each new game is resolved and merged.
    fn on_game(&self, current: usize, total: usize, name: &str);

    /// Called when the pass is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_game(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_game(&self, current: usize, total: usize, name: &str) {
        log::debug!("  [{}/{}] {}", current, total, name);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

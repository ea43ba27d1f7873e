//! Keep the games catalog in step with the games list.
//!
//! This crate owns the reconciliation logic: resolving list entries against
//! IGDB, merging both into canonical games, and diffing the list against the
//! stored catalog.

pub mod error;
pub mod merge;
pub mod progress;
pub mod reconcile;
pub mod resolve;
pub mod service;
pub mod settings;
pub mod source;

pub use error::SyncError;
pub use merge::{cover_url, genre_names, merge, release_year};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use reconcile::{ReconcileResult, ReconcileStats, reconcile};
pub use resolve::{Resolution, pick_best_match};
pub use service::GamesService;
pub use settings::{SyncSettings, setting_sources};
pub use source::{FileListSource, HttpListSource, ListSource, list_source_for};

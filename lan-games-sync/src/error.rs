use lan_games_db::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The list document could not be fetched. Recovered by the reconciler,
    /// which falls back to the persisted games.
    #[error("Games list unavailable at {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("Database error: {0}")]
    Persistence(#[from] OperationError),

    #[error("No game with id {id}")]
    NotFound { id: i64 },
}

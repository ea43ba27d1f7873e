//! SQLite persistence layer for the games catalog.
//!
//! Provides schema creation, batch save/remove operations, and read queries
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{OperationError, remove_games, save_games};
pub use queries::{all_games, count_games, find_game, find_game_by_original_name};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};

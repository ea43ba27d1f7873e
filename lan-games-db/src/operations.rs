//! Write operations for persisted games.
//!
//! Both operations run as a single transaction: either every row of the
//! batch is written or none is.

use lan_games_catalog::CanonicalGame;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to encode column '{column}': {source}")]
    Encode {
        column: &'static str,
        source: serde_json::Error,
    },
}

/// Save a batch of games.
///
/// Games without an `id` are inserted and get one assigned; games with an
/// `id` are inserted or replaced on that primary key. Returns the batch with
/// every `id` filled in, in input order.
pub fn save_games(
    conn: &Connection,
    games: &[CanonicalGame],
) -> Result<Vec<CanonicalGame>, OperationError> {
    if games.is_empty() {
        return Ok(Vec::new());
    }

    in_transaction(conn, |conn| {
        let mut saved = Vec::with_capacity(games.len());
        for game in games {
            let id = write_game(conn, game)?;
            saved.push(CanonicalGame {
                id: Some(id),
                ..game.clone()
            });
        }
        Ok(saved)
    })
}

/// Delete games by primary key. Games without an `id` were never stored and
/// are skipped. Returns the number of rows deleted.
pub fn remove_games(conn: &Connection, games: &[CanonicalGame]) -> Result<usize, OperationError> {
    let ids: Vec<i64> = games.iter().filter_map(|g| g.id).collect();
    if ids.is_empty() {
        return Ok(0);
    }

    in_transaction(conn, |conn| {
        let mut stmt = conn.prepare_cached("DELETE FROM games WHERE id = ?1")?;
        let mut deleted = 0;
        for id in &ids {
            deleted += stmt.execute(params![id])?;
        }
        Ok(deleted)
    })
}

fn in_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T, OperationError>,
) -> Result<T, OperationError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    match f(conn) {
        Ok(value) => {
            conn.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn write_game(conn: &Connection, game: &CanonicalGame) -> Result<i64, OperationError> {
    let genres = serde_json::to_string(&game.genres).map_err(|source| OperationError::Encode {
        column: "genres",
        source,
    })?;
    let links = serde_json::to_string(&game.links).map_err(|source| OperationError::Encode {
        column: "links",
        source,
    })?;
    let category = game.category.map(|c| c.as_str());

    match game.id {
        None => {
            conn.execute(
                "INSERT INTO games (external_id, display_name, original_name, summary, genres,
                                    release_year, rating, is_free, category, cover_url, links)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    game.external_id,
                    game.display_name,
                    game.original_name,
                    game.summary,
                    genres,
                    game.release_year,
                    game.rating,
                    game.is_free,
                    category,
                    game.cover_url,
                    links,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        }
        Some(id) => {
            conn.execute(
                "INSERT INTO games (id, external_id, display_name, original_name, summary, genres,
                                    release_year, rating, is_free, category, cover_url, links)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                 ON CONFLICT(id) DO UPDATE SET
                     external_id = excluded.external_id,
                     display_name = excluded.display_name,
                     original_name = excluded.original_name,
                     summary = excluded.summary,
                     genres = excluded.genres,
                     release_year = excluded.release_year,
                     rating = excluded.rating,
                     is_free = excluded.is_free,
                     category = excluded.category,
                     cover_url = excluded.cover_url,
                     links = excluded.links",
                params![
                    id,
                    game.external_id,
                    game.display_name,
                    game.original_name,
                    game.summary,
                    genres,
                    game.release_year,
                    game.rating,
                    game.is_free,
                    category,
                    game.cover_url,
                    links,
                ],
            )?;
            Ok(id)
        }
    }
}

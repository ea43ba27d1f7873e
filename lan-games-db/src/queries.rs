//! Read queries for the games database.

use lan_games_catalog::{CanonicalGame, Category, Links};
use rusqlite::{Connection, Row, params};

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "id, external_id, display_name, original_name, summary, genres,
                            release_year, rating, is_free, category, cover_url, links";

/// All games, sorted by display name ascending (case-insensitive), then
/// release year descending.
pub fn all_games(conn: &Connection) -> Result<Vec<CanonicalGame>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games
         ORDER BY display_name COLLATE NOCASE ASC, release_year DESC, id ASC"
    ))?;
    let rows = stmt.query_map([], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a game by its primary key.
pub fn find_game(conn: &Connection, id: i64) -> Result<Option<CanonicalGame>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"))?;
    match stmt.query_row(params![id], row_to_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a game by the name it has in the list document (exact match).
pub fn find_game_by_original_name(
    conn: &Connection,
    original_name: &str,
) -> Result<Option<CanonicalGame>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE original_name = ?1"
    ))?;
    match stmt.query_row(params![original_name], row_to_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn count_games(conn: &Connection) -> Result<usize, OperationError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
    Ok(count as usize)
}

fn row_to_game(row: &Row) -> rusqlite::Result<CanonicalGame> {
    let genres: String = row.get(5)?;
    let category: Option<String> = row.get(9)?;
    let links: String = row.get(11)?;

    Ok(CanonicalGame {
        id: row.get(0)?,
        external_id: row.get(1)?,
        display_name: row.get(2)?,
        original_name: row.get(3)?,
        summary: row.get(4)?,
        genres: decode_json(5, &genres)?,
        release_year: row.get(6)?,
        rating: row.get(7)?,
        is_free: row.get(8)?,
        category: category.as_deref().and_then(Category::from_str_loose),
        cover_url: row.get(10)?,
        links: decode_json::<Links>(11, &links)?,
    })
}

fn decode_json<T: serde::de::DeserializeOwned>(column: usize, text: &str) -> rusqlite::Result<T> {
    serde_json::from_str(text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

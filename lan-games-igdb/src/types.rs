use lan_games_catalog::{CatalogRecord, CoverRecord};
use serde::Deserialize;

/// Game record from the `/games` endpoint. Only the requested fields are
/// present; everything else IGDB may omit.
#[derive(Debug, Deserialize, Clone)]
pub struct IgdbGame {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub genres: Vec<i64>,
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub total_rating: Option<f64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub cover: Option<i64>,
}

impl From<IgdbGame> for CatalogRecord {
    fn from(game: IgdbGame) -> Self {
        CatalogRecord {
            external_id: game.id,
            name: game.name,
            summary: game.summary,
            genre_codes: game.genres,
            first_release_date: game.first_release_date,
            total_rating: game.total_rating,
            url: game.url,
            cover: game.cover,
        }
    }
}

/// Genre from the `/genres` endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct IgdbGenre {
    pub id: i64,
    pub name: String,
}

/// Cover from the `/covers` endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct IgdbCover {
    pub id: i64,
    pub game: i64,
    #[serde(default)]
    pub url: String,
}

impl From<IgdbCover> for CoverRecord {
    fn from(cover: IgdbCover) -> Self {
        CoverRecord {
            id: cover.id,
            game: cover.game,
            url: cover.url,
        }
    }
}

/// Response from the Twitch client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub struct TwitchTokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

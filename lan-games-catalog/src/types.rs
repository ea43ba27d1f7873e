//! Data model types for the multiplayer games catalog.
//!
//! These types cover the three shapes a game passes through: a `GameStub`
//! parsed from the list document, a `CatalogRecord` returned by IGDB, and the
//! persisted `CanonicalGame` that merges the two.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── List Document ───────────────────────────────────────────────────────────

/// Section of the list document a game was listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Listed under a "Local Multiplayer" heading.
    Local,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Other => "other",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Links attached to a game, keyed by where they point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam: Option<String>,
    /// Canonical IGDB page, only set once a game is matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub igdb: Option<String>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.steam.is_none() && self.igdb.is_none()
    }

    /// Fill the keys unset in `self` from `other`. Keys already set in `self` win.
    pub fn merged_with(self, other: Links) -> Links {
        Links {
            website: self.website.or(other.website),
            steam: self.steam.or(other.steam),
            igdb: self.igdb.or(other.igdb),
        }
    }
}

/// A lightweight game reference parsed from one bullet of the list document.
///
/// Stubs are rebuilt on every fetch and never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStub {
    pub display_name: String,
    /// Name as written in the list; the join key against persisted games.
    pub original_name: String,
    pub category: Option<Category>,
    pub links: Links,
    pub is_free: bool,
}

impl GameStub {
    /// A stub with no links, not free and no category.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            original_name: name,
            category: None,
            links: Links::default(),
            is_free: false,
        }
    }
}

// ── IGDB ────────────────────────────────────────────────────────────────────

/// A game record returned by an IGDB search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub external_id: i64,
    pub name: String,
    pub summary: Option<String>,
    /// Genre codes in the order IGDB returned them.
    pub genre_codes: Vec<i64>,
    /// First release date as Unix epoch seconds.
    pub first_release_date: Option<i64>,
    pub total_rating: Option<f64>,
    pub url: String,
    pub cover: Option<i64>,
}

/// A cover image belonging to one IGDB game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverRecord {
    pub id: i64,
    /// External id of the game owning this cover.
    pub game: i64,
    /// Protocol-relative image path, e.g. `//images.igdb.com/...jpg`.
    pub url: String,
}

/// Mapping from IGDB genre code to genre name.
///
/// IGDB hands out genre codes as integers in game records, but callers
/// sometimes hold them as strings. Codes are normalized to `i64` here so both
/// forms resolve to the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreVocabulary {
    names: HashMap<i64, String>,
}

impl GenreVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: i64, name: impl Into<String>) {
        self.names.insert(code, name.into());
    }

    /// Look up a genre name by its numeric code.
    pub fn name(&self, code: i64) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    /// Look up a genre name by a code held as text (`"5"`, `" 12 "`).
    pub fn name_for_key(&self, key: &str) -> Option<&str> {
        key.trim().parse::<i64>().ok().and_then(|code| self.name(code))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(i64, String)> for GenreVocabulary {
    fn from_iter<T: IntoIterator<Item = (i64, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// A persisted, merged game record served to readers.
///
/// Either unmatched (`external_id` is `None` and only stub fields are set) or
/// merged with the IGDB record it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalGame {
    /// Assigned by storage; `None` until first saved.
    pub id: Option<i64>,
    pub external_id: Option<i64>,
    pub display_name: String,
    pub original_name: String,
    pub summary: Option<String>,
    /// Genre names, sorted ascending.
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    pub rating: Option<f64>,
    pub is_free: bool,
    pub category: Option<Category>,
    pub cover_url: Option<String>,
    pub links: Links,
}

impl CanonicalGame {
    pub fn is_matched(&self) -> bool {
        self.external_id.is_some()
    }
}

// ── Suggestions ─────────────────────────────────────────────────────────────

/// A game suggested for inclusion in the list. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_lookup_by_number_and_text() {
        let vocab: GenreVocabulary = [
            (5, "Shooter".to_string()),
            (12, "Role-playing (RPG)".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(vocab.name(5), Some("Shooter"));
        assert_eq!(vocab.name_for_key("5"), Some("Shooter"));
        assert_eq!(vocab.name_for_key(" 12 "), Some("Role-playing (RPG)"));
        assert_eq!(vocab.name_for_key("shooter"), None);
        assert_eq!(vocab.name(99), None);
    }

    #[test]
    fn links_merge_keeps_existing_keys() {
        let own = Links {
            website: Some("https://example.com".to_string()),
            ..Links::default()
        };
        let other = Links {
            website: Some("https://other.example.com".to_string()),
            igdb: Some("https://www.igdb.com/games/x".to_string()),
            ..Links::default()
        };
        let merged = own.merged_with(other);
        assert_eq!(merged.website.as_deref(), Some("https://example.com"));
        assert_eq!(merged.igdb.as_deref(), Some("https://www.igdb.com/games/x"));
        assert!(merged.steam.is_none());
    }

    #[test]
    fn category_round_trips_through_text() {
        assert_eq!(Category::from_str_loose("LOCAL"), Some(Category::Local));
        assert_eq!(Category::from_str_loose(Category::Other.as_str()), Some(Category::Other));
        assert_eq!(Category::from_str_loose("online"), None);
    }

    #[test]
    fn empty_links_serialize_to_empty_object() {
        let json = serde_json::to_string(&Links::default()).unwrap();
        assert_eq!(json, "{}");
    }
}

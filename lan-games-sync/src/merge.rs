//! Merge a list entry with its resolved IGDB record into a canonical game.
//!
//! The stub owns the identity of a game (its original name, links, free flag
//! and section); IGDB owns the descriptive fields. An unmatched stub keeps
//! only what the list provides.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use lan_games_catalog::{CanonicalGame, CoverRecord, GameStub, GenreVocabulary, Links};

use crate::resolve::Resolution;

/// Build the canonical game for `stub`.
pub fn merge(
    stub: &GameStub,
    resolution: &Resolution,
    genres: &GenreVocabulary,
    covers: &HashMap<i64, CoverRecord>,
) -> CanonicalGame {
    match resolution {
        Resolution::Unmatched => CanonicalGame {
            id: None,
            external_id: None,
            display_name: stub.display_name.clone(),
            original_name: stub.original_name.clone(),
            summary: None,
            genres: Vec::new(),
            release_year: None,
            rating: None,
            is_free: stub.is_free,
            category: stub.category,
            cover_url: None,
            links: stub.links.clone(),
        },
        Resolution::Matched(record) => {
            let igdb_links = Links {
                igdb: Some(record.url.clone()).filter(|u| !u.is_empty()),
                ..Links::default()
            };

            CanonicalGame {
                id: None,
                external_id: Some(record.external_id),
                display_name: record.name.clone(),
                original_name: stub.original_name.clone(),
                summary: record.summary.clone(),
                genres: genre_names(&record.genre_codes, genres),
                release_year: record.first_release_date.and_then(release_year),
                rating: record.total_rating,
                is_free: stub.is_free,
                category: stub.category,
                cover_url: covers
                    .get(&record.external_id)
                    .map(|cover| cover_url(&cover.url)),
                links: stub.links.clone().merged_with(igdb_links),
            }
        }
    }
}

/// Map genre codes to names. Unknown codes are dropped; the result is
/// sorted and free of duplicates.
pub fn genre_names(codes: &[i64], vocabulary: &GenreVocabulary) -> Vec<String> {
    let mut names: Vec<String> = codes
        .iter()
        .filter_map(|&code| vocabulary.name(code))
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Turn an IGDB protocol-relative image path into an absolute https URL.
pub fn cover_url(path: &str) -> String {
    match path.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => path.to_string(),
    }
}

/// UTC calendar year of a Unix timestamp in seconds.
pub fn release_year(epoch_seconds: i64) -> Option<i32> {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0).map(|dt| dt.year())
}

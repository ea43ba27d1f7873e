//! Entity resolution: pick the IGDB record a list entry refers to.

use lan_games_catalog::{CatalogRecord, GameStub};

/// Outcome of resolving one stub against its search results.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Matched(CatalogRecord),
    Unmatched,
}

impl Resolution {
    pub fn external_id(&self) -> Option<i64> {
        match self {
            Resolution::Matched(record) => Some(record.external_id),
            Resolution::Unmatched => None,
        }
    }
}

/// Choose the best candidate for `stub`.
///
/// The first candidate whose name equals the stub's name ignoring case wins,
/// wherever it appears. Without one, the first candidate is taken as IGDB's
/// own best guess. No candidates means no match.
pub fn pick_best_match(mut candidates: Vec<CatalogRecord>, stub: &GameStub) -> Resolution {
    if candidates.is_empty() {
        return Resolution::Unmatched;
    }

    let wanted = stub.original_name.to_lowercase();
    let idx = candidates
        .iter()
        .position(|c| c.name.to_lowercase() == wanted)
        .unwrap_or(0);
    Resolution::Matched(candidates.swap_remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> CatalogRecord {
        CatalogRecord {
            external_id: id,
            name: name.to_string(),
            summary: None,
            genre_codes: vec![],
            first_release_date: None,
            total_rating: None,
            url: String::new(),
            cover: None,
        }
    }

    #[test]
    fn exact_match_wins_regardless_of_position() {
        let candidates = vec![
            record(1, "Overcooked! 2"),
            record(2, "Overcooked: Special Edition"),
            record(3, "OVERCOOKED"),
            record(4, "Overcooked"),
        ];
        let resolution = pick_best_match(candidates, &GameStub::named("Overcooked"));
        assert_eq!(resolution.external_id(), Some(3));
    }

    #[test]
    fn falls_back_to_first_candidate() {
        let candidates = vec![record(10, "Worms Armageddon"), record(11, "Worms W.M.D")];
        let resolution = pick_best_match(candidates, &GameStub::named("Worms"));
        assert_eq!(resolution.external_id(), Some(10));
    }

    #[test]
    fn no_candidates_is_unmatched() {
        let resolution = pick_best_match(vec![], &GameStub::named("Obscure Indie Game"));
        assert_eq!(resolution, Resolution::Unmatched);
        assert_eq!(resolution.external_id(), None);
    }
}

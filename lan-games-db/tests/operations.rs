use lan_games_catalog::{CanonicalGame, Category, Links};
use lan_games_db::*;

fn unmatched(name: &str) -> CanonicalGame {
    CanonicalGame {
        id: None,
        external_id: None,
        display_name: name.to_string(),
        original_name: name.to_string(),
        summary: None,
        genres: vec![],
        release_year: None,
        rating: None,
        is_free: false,
        category: Some(Category::Other),
        cover_url: None,
        links: Links::default(),
    }
}

fn matched() -> CanonicalGame {
    CanonicalGame {
        id: None,
        external_id: Some(17000),
        display_name: "Keep Talking and Nobody Explodes".to_string(),
        original_name: "Keep Talking and Nobody Explodes".to_string(),
        summary: Some("Defuse the bomb.".to_string()),
        genres: vec!["Puzzle".to_string(), "Simulator".to_string()],
        release_year: Some(2015),
        rating: Some(82.5),
        is_free: true,
        category: Some(Category::Local),
        cover_url: Some("https://images.igdb.com/igdb/image/upload/t_thumb/co1.jpg".to_string()),
        links: Links {
            steam: Some("https://store.steampowered.com/app/341800".to_string()),
            igdb: Some("https://www.igdb.com/games/keep-talking".to_string()),
            ..Links::default()
        },
    }
}

#[test]
fn save_assigns_ids_in_order() {
    let conn = open_memory().unwrap();
    let saved = save_games(&conn, &[unmatched("Quake"), unmatched("Doom")]).unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|g| g.id.is_some()));
    assert_ne!(saved[0].id, saved[1].id);
    assert_eq!(saved[0].original_name, "Quake");
    assert_eq!(count_games(&conn).unwrap(), 2);
}

#[test]
fn saved_game_round_trips_all_columns() {
    let conn = open_memory().unwrap();
    let saved = save_games(&conn, &[matched()]).unwrap();
    let loaded = find_game(&conn, saved[0].id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded, saved[0]);
}

#[test]
fn save_with_id_updates_in_place() {
    let conn = open_memory().unwrap();
    let mut game = save_games(&conn, &[unmatched("Quake")]).unwrap().remove(0);
    game.summary = Some("Arena shooter".to_string());
    save_games(&conn, &[game.clone()]).unwrap();

    assert_eq!(count_games(&conn).unwrap(), 1);
    let loaded = find_game(&conn, game.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.summary.as_deref(), Some("Arena shooter"));
}

#[test]
fn duplicate_original_name_rolls_back_batch() {
    let conn = open_memory().unwrap();
    save_games(&conn, &[unmatched("Quake")]).unwrap();

    let err = save_games(&conn, &[unmatched("Doom"), unmatched("Quake")]).unwrap_err();
    assert!(matches!(err, OperationError::Sqlite(_)));
    assert_eq!(count_games(&conn).unwrap(), 1);
    assert!(find_game_by_original_name(&conn, "Doom").unwrap().is_none());
}

#[test]
fn empty_batches_are_no_ops() {
    let conn = open_memory().unwrap();
    assert!(save_games(&conn, &[]).unwrap().is_empty());
    assert_eq!(remove_games(&conn, &[]).unwrap(), 0);
}

#[test]
fn remove_deletes_by_id() {
    let conn = open_memory().unwrap();
    let saved = save_games(&conn, &[unmatched("Quake"), unmatched("Doom")]).unwrap();
    let removed = remove_games(&conn, &saved[..1]).unwrap();
    assert_eq!(removed, 1);
    assert!(find_game_by_original_name(&conn, "Quake").unwrap().is_none());
    assert!(find_game_by_original_name(&conn, "Doom").unwrap().is_some());
}

#[test]
fn remove_skips_unsaved_games() {
    let conn = open_memory().unwrap();
    save_games(&conn, &[unmatched("Quake")]).unwrap();
    assert_eq!(remove_games(&conn, &[unmatched("Quake")]).unwrap(), 0);
    assert_eq!(count_games(&conn).unwrap(), 1);
}

#[test]
fn aborted_write_surfaces_error() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_games BEFORE INSERT ON games
         BEGIN SELECT RAISE(ABORT, 'read-only catalog'); END;",
    )
    .unwrap();

    let err = save_games(&conn, &[unmatched("Quake")]).unwrap_err();
    assert!(err.to_string().contains("read-only catalog"));

    // The connection is usable again after the rollback.
    conn.execute_batch("DROP TRIGGER reject_games").unwrap();
    save_games(&conn, &[unmatched("Quake")]).unwrap();
}

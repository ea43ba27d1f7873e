use lan_games_catalog::list_parser::{ListParseError, parse_entry, parse_list};
use lan_games_catalog::{Category, Links};

const README: &str = "\
# Awesome LAN Party Games

A curated list of games for LAN parties.

## Local Multiplayer

- [Keep Talking and Nobody Explodes](https://store.steampowered.com/app/341800)*
- [Overcooked](https://www.team17.com/games/overcooked/)

### Racing

- [Micro Machines](https://example.com/micro-machines)

## Online Multiplayer

- [Teeworlds*](https://teeworlds.com)
- Age of Empires II
- [Broken entry](
- [No link here]
* Not a game bullet
  - [Nested](https://nested.example.com)
";

#[test]
fn free_steam_entry() {
    let stub = parse_entry(
        "[Keep Talking and Nobody Explodes](https://store.steampowered.com/app/341800)*",
        None,
    )
    .unwrap();
    assert_eq!(stub.original_name, "Keep Talking and Nobody Explodes");
    assert_eq!(stub.display_name, "Keep Talking and Nobody Explodes");
    assert_eq!(
        stub.links,
        Links {
            steam: Some("https://store.steampowered.com/app/341800".to_string()),
            ..Links::default()
        }
    );
    assert!(stub.is_free);
}

#[test]
fn website_entry_is_not_free() {
    let stub = parse_entry("[Teeworlds](https://teeworlds.com)", None).unwrap();
    assert_eq!(stub.original_name, "Teeworlds");
    assert_eq!(stub.links.website.as_deref(), Some("https://teeworlds.com"));
    assert!(stub.links.steam.is_none());
    assert!(!stub.is_free);
}

#[test]
fn free_marker_inside_brackets() {
    let stub = parse_entry("[Teeworlds*](https://teeworlds.com)", None).unwrap();
    assert_eq!(stub.original_name, "Teeworlds");
    assert!(stub.is_free);
}

#[test]
fn plain_name_without_link() {
    let stub = parse_entry("Age of Empires II", Some(Category::Other)).unwrap();
    assert_eq!(stub.original_name, "Age of Empires II");
    assert!(stub.links.is_empty());
    assert_eq!(stub.category, Some(Category::Other));
}

#[test]
fn plain_name_with_free_marker() {
    let stub = parse_entry("Zero-K*", None).unwrap();
    assert_eq!(stub.original_name, "Zero-K");
    assert!(stub.is_free);
}

#[test]
fn trailing_description_is_ignored() {
    let stub = parse_entry("[Worms](https://example.com/worms) - turn based chaos", None).unwrap();
    assert_eq!(stub.original_name, "Worms");
    assert_eq!(stub.links.website.as_deref(), Some("https://example.com/worms"));
    assert!(!stub.is_free);
}

#[test]
fn link_with_parentheses_kept_whole() {
    let stub =
        parse_entry("[Worms](https://en.wikipedia.org/wiki/Worms_(series))", None).unwrap();
    assert_eq!(stub.original_name, "Worms");
    assert_eq!(
        stub.links.website.as_deref(),
        Some("https://en.wikipedia.org/wiki/Worms_(series)")
    );
}

#[test]
fn link_with_parentheses_then_free_marker() {
    let stub = parse_entry("[Worms](https://example.com/wiki/Worms_(series))* - classic", None)
        .unwrap();
    assert_eq!(
        stub.links.website.as_deref(),
        Some("https://example.com/wiki/Worms_(series)")
    );
    assert!(stub.is_free);
}

#[test]
fn name_with_brackets() {
    let stub = parse_entry("[Worms [2003]](https://example.com/worms)", None).unwrap();
    assert_eq!(stub.original_name, "Worms [2003]");
    assert_eq!(stub.links.website.as_deref(), Some("https://example.com/worms"));
}

#[test]
fn unclosed_bracket_fails_entry() {
    let err = parse_entry("[Broken entry(https://example.com)", None).unwrap_err();
    assert!(matches!(err, ListParseError::UnclosedBracket(_)));
}

#[test]
fn missing_link_fails_entry() {
    let err = parse_entry("[No link here]", None).unwrap_err();
    assert!(matches!(err, ListParseError::MissingLink(_)));
}

#[test]
fn empty_name_fails_entry() {
    assert_eq!(parse_entry("*", None).unwrap_err(), ListParseError::EmptyName);
}

#[test]
fn empty_document() {
    assert!(parse_list("").is_empty());
}

#[test]
fn document_keeps_line_order_and_skips_bad_lines() {
    let stubs = parse_list(README);
    let names: Vec<&str> = stubs.iter().map(|s| s.original_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Keep Talking and Nobody Explodes",
            "Overcooked",
            "Micro Machines",
            "Teeworlds",
            "Age of Empires II",
            "Nested",
        ]
    );
}

#[test]
fn document_sections_set_category() {
    let stubs = parse_list(README);
    let category = |name: &str| {
        stubs
            .iter()
            .find(|s| s.original_name == name)
            .and_then(|s| s.category)
    };
    assert_eq!(category("Keep Talking and Nobody Explodes"), Some(Category::Local));
    assert_eq!(category("Micro Machines"), Some(Category::Local));
    assert_eq!(category("Teeworlds"), Some(Category::Other));
    assert_eq!(category("Age of Empires II"), Some(Category::Other));
}

#[test]
fn bullets_before_any_heading_are_other() {
    let stubs = parse_list("- Quake III Arena\n");
    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].category, Some(Category::Other));
}

#[test]
fn parsing_is_deterministic() {
    assert_eq!(parse_list(README), parse_list(README));
}

//! Parser for the markdown games list.
//!
//! The list is a markdown document where every game is a bullet line:
//! ```text
//! ## Local Multiplayer
//! - [Keep Talking and Nobody Explodes](https://store.steampowered.com/app/341800)*
//! ## Online
//! - [Teeworlds](https://teeworlds.com)
//! - Some Game Without A Link
//! ```
//!
//! A bullet may start with a bracketed name followed by its link. A trailing
//! `*` marks the game as free to play. Bullets under a "Local Multiplayer"
//! heading (or any of its sub-headings) are tagged [`Category::Local`], all
//! others [`Category::Other`].

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{Category, GameStub, Links};

/// Prefix that marks a line as a game entry.
pub const BULLET_PREFIX: &str = "- ";

const LOCAL_SECTION: &str = "local multiplayer";
const FREE_MARKER: char = '*';
const STEAM_HOST: &str = "steampowered.com";

/// `[name](url)rest` or `[name][url]rest`. Names may contain one level of
/// `[...]` and URLs one level of balanced `(...)`.
static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\[(?P<name>(?:[^\[\]]|\[[^\]]*\])*)\]\s*",
        r"(?:\((?P<paren>(?:[^()\s]|\([^()\s]*\))+)\)|\[(?P<bracket>[^\]\s]+)\])",
        r"(?P<rest>.*)$",
    ))
    .expect("static pattern")
});

/// Errors for a single list entry. A failing entry is skipped by
/// [`parse_list`]; it never aborts the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListParseError {
    #[error("unclosed bracket in entry '{0}'")]
    UnclosedBracket(String),

    #[error("no link after bracketed name in entry '{0}'")]
    MissingLink(String),

    #[error("entry has no name")]
    EmptyName,
}

/// Parse a whole list document into stubs, in source line order.
///
/// Entries that fail to parse are logged and skipped.
pub fn parse_list(text: &str) -> Vec<GameStub> {
    let mut sections = SectionTracker::default();
    let mut stubs = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(heading) = heading(line) {
            sections.enter(heading.0, heading.1);
            continue;
        }

        let Some(entry) = line.strip_prefix(BULLET_PREFIX) else {
            continue;
        };

        match parse_entry(entry, Some(sections.category())) {
            Ok(stub) => stubs.push(stub),
            Err(e) => log::debug!("Skipping list line '{}': {}", line, e),
        }
    }

    stubs
}

/// Parse one entry (the bullet line without its `"- "` prefix).
pub fn parse_entry(entry: &str, category: Option<Category>) -> Result<GameStub, ListParseError> {
    let entry = entry.trim();
    let mut links = Links::default();
    let mut free_after_link = false;

    let mut name = if entry.starts_with('[') {
        let Some(caps) = LINK_ENTRY.captures(entry) else {
            return Err(if entry.contains(']') {
                ListParseError::MissingLink(entry.to_string())
            } else {
                ListParseError::UnclosedBracket(entry.to_string())
            });
        };

        let url = caps
            .name("paren")
            .or_else(|| caps.name("bracket"))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ListParseError::MissingLink(entry.to_string()))?;

        if url.contains(STEAM_HOST) {
            links.steam = Some(url);
        } else {
            links.website = Some(url);
        }

        free_after_link = caps
            .name("rest")
            .is_some_and(|rest| rest.as_str().trim_start().starts_with(FREE_MARKER));

        caps["name"].trim().to_string()
    } else {
        entry.to_string()
    };

    let mut is_free = free_after_link;
    if let Some(stripped) = name.strip_suffix(FREE_MARKER) {
        name = stripped.trim_end().to_string();
        is_free = true;
    }

    if name.is_empty() {
        return Err(ListParseError::EmptyName);
    }

    Ok(GameStub {
        display_name: name.clone(),
        original_name: name,
        category,
        links,
        is_free,
    })
}

/// Split a markdown heading into its level and text.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }
    let text = &line[level..];
    if !text.is_empty() && !text.starts_with(' ') {
        return None;
    }
    Some((level, text.trim()))
}

/// Tracks the heading stack so sub-sections inherit the local tag.
#[derive(Default)]
struct SectionTracker {
    stack: Vec<(usize, bool)>,
}

impl SectionTracker {
    fn enter(&mut self, level: usize, text: &str) {
        while self.stack.last().is_some_and(|&(l, _)| l >= level) {
            self.stack.pop();
        }
        let inherited = self.stack.last().is_some_and(|&(_, local)| local);
        let local = inherited || text.to_lowercase().contains(LOCAL_SECTION);
        self.stack.push((level, local));
    }

    fn category(&self) -> Category {
        match self.stack.last() {
            Some(&(_, true)) => Category::Local,
            _ => Category::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels() {
        assert_eq!(heading("## Local Multiplayer"), Some((2, "Local Multiplayer")));
        assert_eq!(heading("#"), Some((1, "")));
        assert_eq!(heading("#hashtag"), None);
        assert_eq!(heading("- [A](b)"), None);
    }

    #[test]
    fn sub_sections_inherit_local() {
        let mut tracker = SectionTracker::default();
        assert_eq!(tracker.category(), Category::Other);
        tracker.enter(2, "Local Multiplayer");
        tracker.enter(3, "Racing");
        assert_eq!(tracker.category(), Category::Local);
        tracker.enter(2, "Online");
        assert_eq!(tracker.category(), Category::Other);
    }
}

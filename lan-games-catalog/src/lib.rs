//! Game catalog data model types and the markdown games list parser.
//!
//! This crate has no network or database dependencies. The IGDB client,
//! storage and reconciliation crates all exchange the types defined here.

pub mod list_parser;
pub mod types;

pub use list_parser::{BULLET_PREFIX, ListParseError, parse_entry, parse_list};
pub use types::*;

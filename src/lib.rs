//! A small pattern language for matching and searching syntax trees.
//!
//! Patterns such as `Send<receiver = nil, name ^= :find>` or `[FixnumLiteral*, any]` are
//! compiled by [`parse`] into a [`Matcher`], which can then be tested against any tree that
//! implements [`Host`]. [`matches`] and [`find`] accept either pattern text or a compiled
//! matcher.

pub mod matcher;
pub mod parser;
pub mod query;
pub mod tree;

pub use matcher::{Matcher, RegexpFlags, RegexpMatcher};
pub use parser::{ParserOptions, PatternError, PatternErrorKind, PatternResult, parse, parse_with};
pub use query::{Pattern, find, matches};
pub use tree::{Attribute, Builder, BuilderError, Host, Node, Value};

mod error;
mod grammar;
mod lexer;
mod literal;
mod options;
mod token;

pub use error::{PatternError, PatternErrorKind, PatternResult};
pub use lexer::{Lexer, tokenize};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions, ParserOptionsBuilder, ParserOptionsError};
pub use token::{Token, TokenKind};

use crate::matcher::Matcher;
use grammar::Parser;

/// Compiles `pattern` with the default [`ParserOptions`].
pub fn parse(pattern: &str) -> PatternResult<Matcher> {
    parse_with(pattern, &ParserOptions::default())
}

#[tracing::instrument(level = "trace", skip(pattern, options), fields(pattern = %pattern, len = pattern.len() as u64))]
pub fn parse_with(pattern: &str, options: &ParserOptions) -> PatternResult<Matcher> {
    Parser::new(pattern, *options).parse().inspect_err(|err| {
        tracing::event!(
            tracing::Level::DEBUG,
            operation = "parse",
            error = %err,
            offset = ?err.offset(),
            "pattern rejected"
        );
    })
}

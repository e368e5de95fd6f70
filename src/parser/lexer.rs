use regex::Regex;
use std::sync::LazyLock;

use super::token::{OPERATOR_METHOD_NAMES, OPERATORS, Token, TokenKind};
use super::{PatternError, PatternResult};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[ \t\r\n]+").expect("whitespace pattern should compile"));

static METHOD_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[a-zA-Z_][a-zA-Z0-9_]*[?!]?").expect("method name pattern should compile")
});

static ATTRIBUTE_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[ \t\r\n]*(?:=|\^=|\$=|\*=)").expect("attribute operator pattern should compile")
});

/// Complex token patterns in priority order. Each is anchored at the start of the remaining
/// input, never at a line boundary.
static COMPLEX_TOKENS: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    [
        (TokenKind::VarName, r"\A[a-z_][a-zA-Z0-9_]*"),
        (TokenKind::ClassName, r"\A[A-Z][a-zA-Z0-9_]*"),
        (
            TokenKind::Symbol,
            r"\A:(?:[a-zA-Z_][a-zA-Z0-9_]*[?!]?|\[\]=?|<=>|===?|=~|!=|!~|<<|<=|>>|>=|\*\*|[+-]@|[-+*/%&|^~<>!`])",
        ),
        (
            TokenKind::Integer,
            r"\A[+-]?(?:0[bB][01]+(?:_[01]+)*|0[oO][0-7]+(?:_[0-7]+)*|0[dD][0-9]+(?:_[0-9]+)*|0[xX][0-9a-fA-F]+(?:_[0-9a-fA-F]+)*|0(?:_?[0-7]+)*|[1-9][0-9]*(?:_[0-9]+)*)",
        ),
        (
            TokenKind::String,
            r#"(?s)\A(?:'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*")"#,
        ),
        (TokenKind::Regexp, r"(?s)\A/(?:\\.|[^\\/])*/[imx]*"),
    ]
    .into_iter()
    .map(|(kind, source)| {
        let regex = Regex::new(source).expect("token pattern should compile");
        (kind, regex)
    })
    .collect()
});

/// Single-pass scanner over a pattern string.
///
/// Tokens are produced on demand. At each position every candidate is tried and the longest
/// lexeme wins; on equal length the earlier candidate wins (operators before complex tokens).
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        if let Some(m) = WHITESPACE.find(self.remaining()) {
            self.pos += m.end();
        }
    }

    pub fn next_token(&mut self) -> PatternResult<Option<Token<'a>>> {
        self.skip_whitespace();

        if self.remaining().is_empty() {
            return Ok(None);
        }

        match self.scan() {
            Some(token) => Ok(Some(self.accept(token))),
            None => Err(self.unexpected_character()),
        }
    }

    /// Scans an attribute name. Operator spellings such as `<=>` or `[]=` are names here,
    /// not operators. When nothing name-like is present the regular token is returned so the
    /// parser can report it.
    pub fn next_method_name(&mut self) -> PatternResult<Option<Token<'a>>> {
        self.skip_whitespace();

        if self.remaining().is_empty() {
            return Ok(None);
        }

        match self.scan_method_name() {
            Some(token) => Ok(Some(self.accept(token))),
            None => self.next_token(),
        }
    }

    fn accept(&mut self, token: Token<'a>) -> Token<'a> {
        self.pos += token.lexeme.len();
        tracing::event!(
            tracing::Level::TRACE,
            operation = "next_token",
            kind = ?token.kind,
            lexeme = %token.lexeme,
            offset = token.offset as u64
        );
        token
    }

    fn scan(&self) -> Option<Token<'a>> {
        let rest = self.remaining();
        let mut best: Option<Token<'a>> = None;

        for (text, kind) in OPERATORS.iter() {
            if rest.starts_with(text) {
                consider(&mut best, Token::new(*kind, &rest[..text.len()], self.pos));
            }
        }

        for (kind, regex) in COMPLEX_TOKENS.iter() {
            if let Some(m) = regex.find(rest) {
                let lexeme = &rest[..m.end()];
                let kind = match kind {
                    TokenKind::VarName => TokenKind::keyword(lexeme).unwrap_or(*kind),
                    _ => *kind,
                };
                consider(&mut best, Token::new(kind, lexeme, self.pos));
            }
        }

        best
    }

    fn scan_method_name(&self) -> Option<Token<'a>> {
        let rest = self.remaining();
        let mut best: Option<Token<'a>> = None;

        if let Some(m) = METHOD_IDENTIFIER.find(rest) {
            let mut end = m.end();
            let plain = !rest[..end].ends_with(['?', '!']);
            if plain && rest[end..].starts_with('=') && self.setter_follows(end + 1) {
                end += 1;
            }
            consider(
                &mut best,
                Token::new(TokenKind::MethodName, &rest[..end], self.pos),
            );
        }

        for name in OPERATOR_METHOD_NAMES.iter() {
            if !rest.starts_with(name) {
                continue;
            }
            if *name == "[]=" && !self.setter_follows(name.len()) {
                continue;
            }
            consider(
                &mut best,
                Token::new(TokenKind::MethodName, &rest[..name.len()], self.pos),
            );
        }

        best
    }

    /// A trailing `=` belongs to a setter name only when an attribute operator follows it.
    fn setter_follows(&self, len: usize) -> bool {
        let rest = self.remaining();
        rest.get(len..)
            .is_some_and(|after| ATTRIBUTE_OPERATOR.is_match(after))
    }

    fn unexpected_character(&self) -> PatternError {
        let character = self
            .remaining()
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();
        PatternError::UnexpectedCharacter {
            character,
            offset: self.pos,
        }
    }
}

fn consider<'a>(best: &mut Option<Token<'a>>, candidate: Token<'a>) {
    let longer = best
        .as_ref()
        .is_none_or(|current| candidate.lexeme.len() > current.lexeme.len());
    if longer {
        *best = Some(candidate);
    }
}

/// Collects every token of `input`. Mostly useful for diagnostics and tests.
pub fn tokenize(input: &str) -> PatternResult<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

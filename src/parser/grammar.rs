use crate::matcher::{
    Anchor, ArrayItem, ArrayMatcher, Literal, Matcher, NodeMatcher, Quantifier, RegexpFlags,
    RegexpMatcher,
};

use super::lexer::Lexer;
use super::literal::{parse_integer, split_regexp, unquote_string};
use super::token::{Token, TokenKind};
use super::{ParserOptions, PatternError, PatternResult};

/// Recursive-descent parser over a lazily scanned token stream with one token of lookahead.
///
/// ```text
/// expression := primary ("|" primary)*
/// primary    := node | array | literal | "any"
/// node       := CLASS_NAME ("<" attrs ">")?
/// attrs      := attr ("," attr)*
/// attr       := METHOD_NAME ("=" expression | ("^=" | "$=" | "*=") (SYMBOL | STRING) | "*=" REGEXP)
/// array      := "[" (item ("," item)*)? "]"
/// item       := expression quantifier?
/// quantifier := "*" | "+" | "?" | "{" INTEGER? ("," INTEGER?)? "}" | "{" "even" "}" | "{" "odd" "}"
/// literal    := INTEGER | STRING | SYMBOL | "true" | "false" | "nil"
/// ```
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token<'a>>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            lookahead: None,
            options,
            depth: 0,
        }
    }

    pub(crate) fn parse(mut self) -> PatternResult<Matcher> {
        let matcher = self.expression()?;
        match self.bump()? {
            None => Ok(matcher),
            Some(token) => Err(unexpected(Some(token))),
        }
    }

    fn expression(&mut self) -> PatternResult<Matcher> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(PatternError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        let mut matcher = self.primary()?;
        while self.eat(TokenKind::Pipe)? {
            let alternative = self.primary()?;
            matcher = matcher.or(alternative);
        }

        self.depth -= 1;
        Ok(matcher)
    }

    fn primary(&mut self) -> PatternResult<Matcher> {
        let Some(token) = self.peek()? else {
            return Err(PatternError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::ClassName => self.node(),
            TokenKind::LeftBracket => self.array(),
            TokenKind::Any => {
                self.bump()?;
                Ok(Matcher::Any)
            }
            TokenKind::Integer
            | TokenKind::String
            | TokenKind::Symbol
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil => self.literal(),
            _ => Err(unexpected(Some(token))),
        }
    }

    fn node(&mut self) -> PatternResult<Matcher> {
        let class = self.expect(TokenKind::ClassName)?;
        let mut node = NodeMatcher::new(class.lexeme);

        if self.eat(TokenKind::LeftAngle)? {
            loop {
                let (name, matcher) = self.attr()?;
                node.insert_attr(name, matcher);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::RightAngle)?;
        }

        Ok(Matcher::Node(node))
    }

    fn attr(&mut self) -> PatternResult<(String, Matcher)> {
        let name = self.method_name()?;
        let operator = self.bump()?;

        let matcher = match operator.map(|token| token.kind) {
            Some(TokenKind::Equals) => self.expression()?,
            Some(TokenKind::StartsWith) => self.regexp_operand(Anchor::Start)?,
            Some(TokenKind::EndsWith) => self.regexp_operand(Anchor::End)?,
            Some(TokenKind::Contains) => self.regexp_operand(Anchor::Anywhere)?,
            _ => return Err(unexpected(operator)),
        };

        Ok((name.lexeme.to_string(), matcher))
    }

    fn method_name(&mut self) -> PatternResult<Token<'a>> {
        debug_assert!(self.lookahead.is_none(), "method names are scanned fresh");
        match self.lexer.next_method_name()? {
            Some(token) if token.kind == TokenKind::MethodName => Ok(token),
            other => Err(unexpected(other)),
        }
    }

    /// Operand of `^=`, `$=` or `*=`. Symbol names and string bodies are matched literally;
    /// only `*=` accepts a regular expression literal.
    fn regexp_operand(&mut self, anchor: Anchor) -> PatternResult<Matcher> {
        let operand = self.bump()?;
        let Some(token) = operand else {
            return Err(PatternError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Symbol => {
                let source = anchor.source_for(&token.lexeme[1..]);
                Ok(Matcher::SymbolRegexp(
                    self.compile(&source, RegexpFlags::empty())?,
                ))
            }
            TokenKind::String => {
                let source = anchor.source_for(&unquote_string(token.lexeme));
                Ok(Matcher::StringRegexp(
                    self.compile(&source, RegexpFlags::empty())?,
                ))
            }
            TokenKind::Regexp if anchor == Anchor::Anywhere => {
                let (source, flags) = split_regexp(token.lexeme);
                Ok(Matcher::IndifferentRegexp(self.compile(&source, flags)?))
            }
            _ => Err(unexpected(Some(token))),
        }
    }

    fn compile(&self, source: &str, flags: RegexpFlags) -> PatternResult<RegexpMatcher> {
        RegexpMatcher::with_size_limit(source, flags, self.options.regex_size_limit).map_err(
            |err| PatternError::InvalidRegexp {
                source_text: source.to_string(),
                reason: err.to_string(),
            },
        )
    }

    fn array(&mut self) -> PatternResult<Matcher> {
        self.expect(TokenKind::LeftBracket)?;
        let mut items = Vec::new();

        if !self.eat(TokenKind::RightBracket)? {
            loop {
                items.push(self.item()?);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::RightBracket)?;
        }

        Ok(Matcher::Array(ArrayMatcher::new(items)))
    }

    fn item(&mut self) -> PatternResult<ArrayItem> {
        let matcher = self.expression()?;

        let quantifier = match self.peek()?.map(|token| token.kind) {
            Some(TokenKind::Star) => {
                self.bump()?;
                Quantifier::zero_or_more(matcher)
            }
            Some(TokenKind::Plus) => {
                self.bump()?;
                Quantifier::one_or_more(matcher)
            }
            Some(TokenKind::Question) => {
                self.bump()?;
                Quantifier::optional(matcher)
            }
            Some(TokenKind::LeftBrace) => {
                self.bump()?;
                self.braced_quantifier(matcher)?
            }
            _ => return Ok(ArrayItem::Single(matcher)),
        };

        Ok(ArrayItem::Quantified(quantifier))
    }

    fn braced_quantifier(&mut self, matcher: Matcher) -> PatternResult<Quantifier> {
        if self.eat(TokenKind::Even)? {
            self.expect(TokenKind::RightBrace)?;
            return Ok(Quantifier::even(matcher));
        }
        if self.eat(TokenKind::Odd)? {
            self.expect(TokenKind::RightBrace)?;
            return Ok(Quantifier::odd(matcher));
        }

        let min = self.count()?;
        let (min, max, last) = if self.eat(TokenKind::Comma)? {
            let max = self.count()?;
            (min.map(|(value, _)| value).unwrap_or(0), max, max)
        } else {
            match min {
                Some((value, token)) => (value, Some((value, token)), min),
                None => {
                    let token = self.bump()?;
                    return Err(unexpected(token));
                }
            }
        };

        self.expect(TokenKind::RightBrace)?;

        Quantifier::new(matcher, min, max.map(|(value, _)| value), 1)
            .ok_or_else(|| unexpected(last.map(|(_, token)| token)))
    }

    /// An optional non-negative repetition count.
    fn count(&mut self) -> PatternResult<Option<(usize, Token<'a>)>> {
        match self.peek()? {
            Some(token) if token.kind == TokenKind::Integer => {
                self.bump()?;
                let value = parse_integer(token.lexeme)
                    .and_then(|value| usize::try_from(value).ok())
                    .ok_or_else(|| unexpected(Some(token)))?;
                Ok(Some((value, token)))
            }
            _ => Ok(None),
        }
    }

    fn literal(&mut self) -> PatternResult<Matcher> {
        let Some(token) = self.bump()? else {
            return Err(PatternError::UnexpectedEnd);
        };

        let literal = match token.kind {
            TokenKind::Integer => {
                let value =
                    parse_integer(token.lexeme).ok_or_else(|| PatternError::IntegerOutOfRange {
                        lexeme: token.lexeme.to_string(),
                        offset: token.offset,
                    })?;
                Literal::Integer(value)
            }
            TokenKind::String => Literal::String(unquote_string(token.lexeme)),
            TokenKind::Symbol => Literal::Symbol(token.lexeme[1..].to_string()),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Nil => Literal::Nil,
            _ => return Err(unexpected(Some(token))),
        };

        Ok(Matcher::Literal(literal))
    }

    fn peek(&mut self) -> PatternResult<Option<Token<'a>>> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next_token()?;
        }
        Ok(self.lookahead)
    }

    fn bump(&mut self) -> PatternResult<Option<Token<'a>>> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.next_token(),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> PatternResult<bool> {
        match self.peek()? {
            Some(token) if token.kind == kind => {
                self.lookahead = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PatternResult<Token<'a>> {
        match self.bump()? {
            Some(token) if token.kind == kind => Ok(token),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(token: Option<Token<'_>>) -> PatternError {
    match token {
        Some(token) => PatternError::UnexpectedToken {
            lexeme: token.lexeme.to_string(),
            offset: token.offset,
        },
        None => PatternError::UnexpectedEnd,
    }
}

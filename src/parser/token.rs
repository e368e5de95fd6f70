use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ClassName,
    VarName,
    MethodName,
    Symbol,
    Integer,
    String,
    Regexp,
    True,
    False,
    Nil,
    Any,
    Even,
    Odd,
    Pipe,
    LeftAngle,
    RightAngle,
    Comma,
    Equals,
    StartsWith,
    EndsWith,
    Contains,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Star,
    Plus,
    Question,
}

impl TokenKind {
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "nil" => Some(Self::Nil),
            "any" => Some(Self::Any),
            "even" => Some(Self::Even),
            "odd" => Some(Self::Odd),
            _ => None,
        }
    }

    pub fn is_attribute_operator(&self) -> bool {
        matches!(
            self,
            Self::Equals | Self::StartsWith | Self::EndsWith | Self::Contains
        )
    }
}

/// Operator tokens in the order they are tried. Ties on length keep the earlier entry.
pub(crate) const OPERATORS: [(&str, TokenKind); 15] = [
    ("|", TokenKind::Pipe),
    ("<", TokenKind::LeftAngle),
    (">", TokenKind::RightAngle),
    (",", TokenKind::Comma),
    ("=", TokenKind::Equals),
    ("^=", TokenKind::StartsWith),
    ("$=", TokenKind::EndsWith),
    ("*=", TokenKind::Contains),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("*", TokenKind::Star),
    ("+", TokenKind::Plus),
    ("?", TokenKind::Question),
];

/// Operator spellings accepted as attribute names, longest first.
pub(crate) const OPERATOR_METHOD_NAMES: [&str; 28] = [
    "[]=", "<=>", "===", "[]", "==", "=~", "!=", "!~", "<<", "<=", ">>", ">=", "**", "+@", "-@",
    "+", "-", "*", "/", "%", "&", "|", "^", "~", "!", "<", ">", "`",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, offset: usize) -> Self {
        Self {
            kind,
            lexeme,
            offset,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme)
    }
}

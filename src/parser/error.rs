use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternErrorKind {
    Lexical,
    Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Unexpected character: {character:?}.")]
    UnexpectedCharacter { character: String, offset: usize },
    #[error("Unexpected token: {lexeme:?}.")]
    UnexpectedToken { lexeme: String, offset: usize },
    #[error("Unexpected end of pattern.")]
    UnexpectedEnd,
    #[error("Integer literal {lexeme:?} is out of range.")]
    IntegerOutOfRange { lexeme: String, offset: usize },
    #[error("Invalid regular expression {source_text:?}: {reason}")]
    InvalidRegexp { source_text: String, reason: String },
    #[error("Pattern nesting exceeds the limit of {limit} levels.")]
    NestingTooDeep { limit: usize },
}

impl PatternError {
    pub fn kind(&self) -> PatternErrorKind {
        match self {
            PatternError::UnexpectedCharacter { .. } => PatternErrorKind::Lexical,
            _ => PatternErrorKind::Syntax,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.kind() == PatternErrorKind::Lexical
    }

    /// Byte offset into the pattern where the error was detected, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            PatternError::UnexpectedCharacter { offset, .. }
            | PatternError::UnexpectedToken { offset, .. }
            | PatternError::IntegerOutOfRange { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type PatternResult<T> = Result<T, PatternError>;

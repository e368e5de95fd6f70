use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher::DEFAULT_REGEX_SIZE_LIMIT;

pub const DEFAULT_MAX_DEPTH: usize = 128;
const MIN_REGEX_SIZE_LIMIT: usize = 1 << 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserOptions {
    /// Deepest allowed nesting of node, array and choice sub-patterns.
    pub max_depth: usize,
    /// Compiled size limit for regular expressions, in bytes.
    pub regex_size_limit: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl ParserOptions {
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ParserOptionsError> {
        if self.max_depth == 0 {
            return Err(ParserOptionsError::MaxDepthInvalid {
                provided: self.max_depth,
            });
        }
        if self.regex_size_limit < MIN_REGEX_SIZE_LIMIT {
            return Err(ParserOptionsError::RegexSizeLimitTooSmall {
                provided: self.regex_size_limit,
                min: MIN_REGEX_SIZE_LIMIT,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParserOptionsBuilder {
    options: ParserOptions,
}

impl ParserOptionsBuilder {
    pub fn max_depth(mut self, value: usize) -> Self {
        self.options.max_depth = value;
        self
    }

    pub fn regex_size_limit(mut self, value: usize) -> Self {
        self.options.regex_size_limit = value;
        self
    }

    pub fn build(self) -> Result<ParserOptions, ParserOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserOptionsError {
    #[error("max_depth must be at least 1 (got {provided})")]
    MaxDepthInvalid { provided: usize },
    #[error("regex_size_limit must be at least {min} bytes (got {provided})")]
    RegexSizeLimitTooSmall { provided: usize, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = ParserOptions::default();
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn builder_validates() {
        let err = ParserOptions::builder()
            .max_depth(0)
            .build()
            .expect_err("zero depth is invalid");
        assert_eq!(err, ParserOptionsError::MaxDepthInvalid { provided: 0 });

        let err = ParserOptions::builder()
            .regex_size_limit(16)
            .build()
            .expect_err("tiny regex limit is invalid");
        assert!(matches!(
            err,
            ParserOptionsError::RegexSizeLimitTooSmall { provided: 16, .. }
        ));

        let options = ParserOptions::builder()
            .max_depth(4)
            .build()
            .expect("builder should succeed");
        assert_eq!(options.max_depth, 4);
    }

    #[test]
    fn deserializes_with_defaults_for_missing_fields() {
        let options: ParserOptions =
            serde_json::from_str(r#"{"max_depth": 8}"#).expect("options should deserialize");
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.regex_size_limit, DEFAULT_REGEX_SIZE_LIMIT);
    }
}

use std::borrow::Cow;

use crate::matcher::Matcher;
use crate::parser::{PatternResult, parse};

/// Anything usable as a query: pattern text, which is compiled on use, or an already compiled
/// [`Matcher`], which is used as is.
pub trait Pattern {
    fn to_matcher(&self) -> PatternResult<Cow<'_, Matcher>>;
}

impl Pattern for str {
    fn to_matcher(&self) -> PatternResult<Cow<'_, Matcher>> {
        parse(self).map(Cow::Owned)
    }
}

impl Pattern for String {
    fn to_matcher(&self) -> PatternResult<Cow<'_, Matcher>> {
        self.as_str().to_matcher()
    }
}

impl Pattern for Matcher {
    fn to_matcher(&self) -> PatternResult<Cow<'_, Matcher>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<P: Pattern + ?Sized> Pattern for &P {
    fn to_matcher(&self) -> PatternResult<Cow<'_, Matcher>> {
        (**self).to_matcher()
    }
}

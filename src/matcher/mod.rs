mod display;
mod eval;
mod model;
mod regexp;
mod sequence;

pub(crate) use display::write_quoted;
pub use model::{ArrayItem, ArrayMatcher, ChoiceMatcher, Literal, Matcher, NodeMatcher, Quantifier};
pub use regexp::{Anchor, DEFAULT_REGEX_SIZE_LIMIT, RegexpFlags, RegexpMatcher};

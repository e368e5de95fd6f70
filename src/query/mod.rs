mod pattern;
mod search;

pub use pattern::Pattern;
pub use search::{find, matches};

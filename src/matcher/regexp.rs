use bitflags::bitflags;
use regex::{Regex, RegexBuilder};

pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RegexpFlags: u8 {
        /// `i`
        const IGNORE_CASE = 1 << 0;
        /// `m`: `.` also matches a newline
        const MULTILINE = 1 << 1;
        /// `x`
        const EXTENDED = 1 << 2;
    }
}

impl RegexpFlags {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'i' => Some(Self::IGNORE_CASE),
            'm' => Some(Self::MULTILINE),
            'x' => Some(Self::EXTENDED),
            _ => None,
        }
    }

    pub fn suffix(&self) -> String {
        let mut out = String::new();
        if self.contains(Self::MULTILINE) {
            out.push('m');
        }
        if self.contains(Self::IGNORE_CASE) {
            out.push('i');
        }
        if self.contains(Self::EXTENDED) {
            out.push('x');
        }
        out
    }
}

/// Where literal text must occur for a `^=`, `$=` or `*=` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
    Anywhere,
}

impl Anchor {
    /// Escapes `text` and anchors it to the start or end of the whole input (not of a line).
    pub fn source_for(&self, text: &str) -> String {
        let escaped = regex::escape(text);
        match self {
            Anchor::Start => format!(r"\A{escaped}"),
            Anchor::End => format!(r"{escaped}\z"),
            Anchor::Anywhere => escaped,
        }
    }
}

/// A compiled regular expression together with the source and flags it came from.
///
/// Two regexp matchers are equal when their sources and flags are equal; the compiled
/// automaton is not compared.
#[derive(Debug, Clone)]
pub struct RegexpMatcher {
    source: Box<str>,
    flags: RegexpFlags,
    compiled: Regex,
}

impl RegexpMatcher {
    pub fn new(source: &str, flags: RegexpFlags) -> Result<Self, regex::Error> {
        Self::with_size_limit(source, flags, DEFAULT_REGEX_SIZE_LIMIT)
    }

    /// `^` and `$` match at line boundaries; `\A` and `\z` anchor to the whole text.
    pub fn with_size_limit(
        source: &str,
        flags: RegexpFlags,
        size_limit: usize,
    ) -> Result<Self, regex::Error> {
        let compiled = RegexBuilder::new(source)
            .multi_line(true)
            .case_insensitive(flags.contains(RegexpFlags::IGNORE_CASE))
            .dot_matches_new_line(flags.contains(RegexpFlags::MULTILINE))
            .ignore_whitespace(flags.contains(RegexpFlags::EXTENDED))
            .size_limit(size_limit)
            .build()?;

        Ok(Self {
            source: source.into(),
            flags,
            compiled,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> RegexpFlags {
        self.flags
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

impl PartialEq for RegexpMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for RegexpMatcher {}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(anchor: Anchor, text: &str) -> RegexpMatcher {
        RegexpMatcher::new(&anchor.source_for(text), RegexpFlags::empty())
            .expect("escaped text should compile")
    }

    #[test]
    fn anchored_sources_treat_text_literally() {
        let prefix = literal(Anchor::Start, "a.b");
        assert!(prefix.is_match("a.bc"));
        assert!(!prefix.is_match("axbc"));
        assert!(!prefix.is_match("xa.b"));

        let suffix = literal(Anchor::End, "(x)");
        assert!(suffix.is_match("foo(x)"));
        assert!(!suffix.is_match("foo(x)\n"));

        let needle = literal(Anchor::Anywhere, "*");
        assert!(needle.is_match("a*b"));
        assert!(!needle.is_match("ab"));
    }

    #[test]
    fn prefix_anchor_does_not_match_after_newline() {
        let prefix = literal(Anchor::Start, "find");
        assert!(!prefix.is_match("x\nfind"));
        let suffix = literal(Anchor::End, "find");
        assert!(!suffix.is_match("find\nx"));
    }

    #[test]
    fn caret_and_dollar_match_at_line_boundaries() {
        let line = RegexpMatcher::new("^foo$", RegexpFlags::empty()).expect("source should compile");
        assert!(line.is_match("bar\nfoo\nbaz"));
        assert!(line.is_match("foo"));
        assert!(!line.is_match("bar foo"));
    }

    #[test]
    fn flags_change_compilation() {
        let plain = RegexpMatcher::new("abc", RegexpFlags::empty()).unwrap();
        let folded = RegexpMatcher::new("abc", RegexpFlags::IGNORE_CASE).unwrap();
        assert!(!plain.is_match("ABC"));
        assert!(folded.is_match("ABC"));

        let dotall = RegexpMatcher::new("a.b", RegexpFlags::MULTILINE).unwrap();
        assert!(dotall.is_match("a\nb"));

        let extended = RegexpMatcher::new("a b # comment", RegexpFlags::EXTENDED).unwrap();
        assert!(extended.is_match("ab"));
    }

    #[test]
    fn equality_compares_source_and_flags() {
        let a = RegexpMatcher::new("abc", RegexpFlags::empty()).unwrap();
        let b = RegexpMatcher::new("abc", RegexpFlags::empty()).unwrap();
        let c = RegexpMatcher::new("abc", RegexpFlags::IGNORE_CASE).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_invalid_source() {
        assert!(RegexpMatcher::new("(", RegexpFlags::empty()).is_err());
    }
}

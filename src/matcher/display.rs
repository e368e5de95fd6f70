use std::fmt::{self, Write};

use super::{
    ArrayItem, ArrayMatcher, ChoiceMatcher, Literal, Matcher, NodeMatcher, Quantifier,
    RegexpMatcher,
};

// Renders matchers back into pattern text. Parsing the output yields an equal matcher, except
// for regexp constraints, which always print in their `*= /.../` form.

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Node(node) => write!(f, "{node}"),
            Matcher::Choice(choice) => write!(f, "{choice}"),
            Matcher::Array(array) => write!(f, "{array}"),
            Matcher::Literal(literal) => write!(f, "{literal}"),
            Matcher::SymbolRegexp(regexp)
            | Matcher::StringRegexp(regexp)
            | Matcher::IndifferentRegexp(regexp) => write!(f, "{regexp}"),
            Matcher::Any => f.write_str("any"),
        }
    }
}

impl fmt::Display for NodeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())?;
        if self.attr_count() == 0 {
            return Ok(());
        }

        f.write_char('<')?;
        for (index, (name, matcher)) in self.attrs().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            let operator = match matcher {
                Matcher::SymbolRegexp(_)
                | Matcher::StringRegexp(_)
                | Matcher::IndifferentRegexp(_) => "*=",
                _ => "=",
            };
            write!(f, "{name} {operator} {matcher}")?;
        }
        f.write_char('>')
    }
}

impl fmt::Display for ChoiceMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, alternative) in self.alternatives().iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArrayMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (index, item) in self.items().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match item {
                ArrayItem::Single(matcher) => write!(f, "{matcher}")?,
                ArrayItem::Quantified(quantifier) => write!(f, "{quantifier}")?,
            }
        }
        f.write_char(']')
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matcher())?;
        match (self.min(), self.max(), self.step()) {
            (0, None, 1) => f.write_char('*'),
            (1, None, 1) => f.write_char('+'),
            (0, Some(1), 1) => f.write_char('?'),
            (0, None, 2) => f.write_str("{even}"),
            (1, None, 2) => f.write_str("{odd}"),
            (min, Some(max), _) if min == max => write!(f, "{{{min}}}"),
            (0, Some(max), _) => write!(f, "{{,{max}}}"),
            (min, None, _) => write!(f, "{{{min},}}"),
            (min, Some(max), _) => write!(f, "{{{min},{max}}}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("nil"),
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::String(value) => write_quoted(f, value),
            Literal::Symbol(name) => write!(f, ":{name}"),
        }
    }
}

impl fmt::Display for RegexpMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('/')?;
        let mut escaped = false;
        for ch in self.source().chars() {
            if ch == '/' && !escaped {
                f.write_char('\\')?;
            }
            escaped = ch == '\\' && !escaped;
            f.write_char(ch)?;
        }
        write!(f, "/{}", self.flags().suffix())
    }
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\x0c' => f.write_str("\\f")?,
            '\x0b' => f.write_str("\\v")?,
            '\x07' => f.write_str("\\a")?,
            '\x1b' => f.write_str("\\e")?,
            '\x08' => f.write_str("\\b")?,
            ch if ch.is_ascii_control() => write!(f, "\\x{:02x}", ch as u32)?,
            ch => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RegexpFlags;

    #[test]
    fn prints_nodes_and_choices() {
        let matcher = Matcher::Node(
            NodeMatcher::new("Foo")
                .with_attr("a", Matcher::literal(42).or(Matcher::literal(43)))
                .with_attr("<=>", Matcher::symbol("b")),
        );
        assert_eq!(matcher.to_string(), "Foo<a = 42 | 43, <=> = :b>");
        assert_eq!(Matcher::node("Foo").to_string(), "Foo");
    }

    #[test]
    fn prints_quantifier_suffixes() {
        let items = vec![
            ArrayItem::Single(Matcher::literal(1)),
            Quantifier::zero_or_more(Matcher::Any).into(),
            Quantifier::one_or_more(Matcher::Any).into(),
            Quantifier::optional(Matcher::Any).into(),
            Quantifier::even(Matcher::Any).into(),
            Quantifier::odd(Matcher::Any).into(),
            Quantifier::exactly(Matcher::Any, 3).into(),
            Quantifier::new(Matcher::Any, 2, None, 1).unwrap().into(),
            Quantifier::new(Matcher::Any, 0, Some(4), 1).unwrap().into(),
            Quantifier::new(Matcher::Any, 2, Some(4), 1).unwrap().into(),
        ];
        assert_eq!(
            Matcher::array(items).to_string(),
            "[1, any*, any+, any?, any{even}, any{odd}, any{3}, any{2,}, any{,4}, any{2,4}]"
        );
    }

    #[test]
    fn prints_literals() {
        assert_eq!(Matcher::nil().to_string(), "nil");
        assert_eq!(Matcher::literal(true).to_string(), "true");
        assert_eq!(Matcher::literal(-7).to_string(), "-7");
        assert_eq!(Matcher::symbol("foo?").to_string(), ":foo?");
        assert_eq!(
            Matcher::literal("a\"b\\c\n\x01").to_string(),
            r#""a\"b\\c\n\x01""#
        );
    }

    #[test]
    fn prints_regexp_constraints() {
        let regexp = RegexpMatcher::new("a/b", RegexpFlags::IGNORE_CASE).unwrap();
        let matcher = Matcher::Node(
            NodeMatcher::new("Send").with_attr("name", Matcher::IndifferentRegexp(regexp)),
        );
        assert_eq!(matcher.to_string(), r"Send<name *= /a\/b/i>");
    }
}

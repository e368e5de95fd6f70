use super::RegexpMatcher;

/// A compiled pattern.
///
/// Matchers are immutable once built and can be shared freely, including across threads.
/// Equality is structural and variant-aware: a `SymbolRegexp` never equals a `StringRegexp`
/// with the same expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    Node(NodeMatcher),
    Choice(ChoiceMatcher),
    Array(ArrayMatcher),
    Literal(Literal),
    /// Matches symbol values whose name matches the expression.
    SymbolRegexp(RegexpMatcher),
    /// Matches string values that match the expression.
    StringRegexp(RegexpMatcher),
    /// Matches symbol or string values that match the expression.
    IndifferentRegexp(RegexpMatcher),
    Any,
}

impl Matcher {
    pub fn node<S: Into<String>>(class_name: S) -> Self {
        Matcher::Node(NodeMatcher::new(class_name))
    }

    /// Returns `None` when `alternatives` is empty.
    pub fn choice(alternatives: Vec<Matcher>) -> Option<Self> {
        ChoiceMatcher::new(alternatives).map(Matcher::Choice)
    }

    pub fn array(items: Vec<ArrayItem>) -> Self {
        Matcher::Array(ArrayMatcher::new(items))
    }

    pub fn literal<L: Into<Literal>>(literal: L) -> Self {
        Matcher::Literal(literal.into())
    }

    pub fn symbol<S: Into<String>>(name: S) -> Self {
        Matcher::Literal(Literal::Symbol(name.into()))
    }

    pub fn nil() -> Self {
        Matcher::Literal(Literal::Nil)
    }

    /// Combines two patterns into a choice, appending to `self` when it already is one.
    pub fn or(self, other: Matcher) -> Self {
        match self {
            Matcher::Choice(mut choice) => {
                choice.alternatives.push(other);
                Matcher::Choice(choice)
            }
            first => Matcher::Choice(ChoiceMatcher {
                alternatives: vec![first, other],
            }),
        }
    }
}

impl From<NodeMatcher> for Matcher {
    fn from(value: NodeMatcher) -> Self {
        Matcher::Node(value)
    }
}

impl From<ChoiceMatcher> for Matcher {
    fn from(value: ChoiceMatcher) -> Self {
        Matcher::Choice(value)
    }
}

impl From<ArrayMatcher> for Matcher {
    fn from(value: ArrayMatcher) -> Self {
        Matcher::Array(value)
    }
}

impl From<Literal> for Matcher {
    fn from(value: Literal) -> Self {
        Matcher::Literal(value)
    }
}

/// Matches nodes of one class whose listed attributes match their sub-patterns.
///
/// Attribute order is kept for printing only; equality ignores it.
#[derive(Debug, Clone)]
pub struct NodeMatcher {
    class_name: String,
    attrs: Vec<(String, Matcher)>,
}

impl NodeMatcher {
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            class_name: class_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Adds a constraint on attribute `name`. A later constraint on the same name replaces the
    /// earlier one.
    pub fn with_attr<S: Into<String>>(mut self, name: S, matcher: Matcher) -> Self {
        self.insert_attr(name.into(), matcher);
        self
    }

    pub(crate) fn insert_attr(&mut self, name: String, matcher: Matcher) {
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = matcher,
            None => self.attrs.push((name, matcher)),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Matcher)> {
        self.attrs.iter().map(|(name, matcher)| (name.as_str(), matcher))
    }

    pub fn attr(&self, name: &str) -> Option<&Matcher> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, matcher)| matcher)
    }

    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }
}

impl PartialEq for NodeMatcher {
    fn eq(&self, other: &Self) -> bool {
        if self.class_name != other.class_name || self.attrs.len() != other.attrs.len() {
            return false;
        }
        self.attrs
            .iter()
            .all(|(name, matcher)| other.attr(name) == Some(matcher))
    }
}

/// Matches when any alternative matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceMatcher {
    alternatives: Vec<Matcher>,
}

impl ChoiceMatcher {
    /// Returns `None` when `alternatives` is empty.
    pub fn new(alternatives: Vec<Matcher>) -> Option<Self> {
        if alternatives.is_empty() {
            return None;
        }
        Some(Self { alternatives })
    }

    pub fn alternatives(&self) -> &[Matcher] {
        &self.alternatives
    }
}

/// Matches array values element by element; see [`ArrayItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayMatcher {
    items: Vec<ArrayItem>,
}

impl ArrayMatcher {
    pub fn new(items: Vec<ArrayItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ArrayItem] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItem {
    /// Consumes exactly one element.
    Single(Matcher),
    /// Consumes a variable number of elements.
    Quantified(Quantifier),
}

impl From<Matcher> for ArrayItem {
    fn from(value: Matcher) -> Self {
        ArrayItem::Single(value)
    }
}

impl From<Quantifier> for ArrayItem {
    fn from(value: Quantifier) -> Self {
        ArrayItem::Quantified(value)
    }
}

/// Repetition of a sub-pattern: at least `min` elements, at most `max` (unbounded when
/// `None`), growing `step` elements at a time past the minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantifier {
    matcher: Box<Matcher>,
    min: usize,
    max: Option<usize>,
    step: usize,
}

impl Quantifier {
    /// Returns `None` when `step` is zero or `max` is below `min`.
    pub fn new(matcher: Matcher, min: usize, max: Option<usize>, step: usize) -> Option<Self> {
        if step == 0 || max.is_some_and(|max| max < min) {
            return None;
        }
        Some(Self {
            matcher: Box::new(matcher),
            min,
            max,
            step,
        })
    }

    fn unchecked(matcher: Matcher, min: usize, max: Option<usize>, step: usize) -> Self {
        Self {
            matcher: Box::new(matcher),
            min,
            max,
            step,
        }
    }

    /// `*`
    pub fn zero_or_more(matcher: Matcher) -> Self {
        Self::unchecked(matcher, 0, None, 1)
    }

    /// `+`
    pub fn one_or_more(matcher: Matcher) -> Self {
        Self::unchecked(matcher, 1, None, 1)
    }

    /// `?`
    pub fn optional(matcher: Matcher) -> Self {
        Self::unchecked(matcher, 0, Some(1), 1)
    }

    /// `{n}`
    pub fn exactly(matcher: Matcher, count: usize) -> Self {
        Self::unchecked(matcher, count, Some(count), 1)
    }

    /// `{even}`
    pub fn even(matcher: Matcher) -> Self {
        Self::unchecked(matcher, 0, None, 2)
    }

    /// `{odd}`
    pub fn odd(matcher: Matcher) -> Self {
        Self::unchecked(matcher, 1, None, 2)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

/// An exact scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Nil,
    Bool(bool),
    Integer(i64),
    String(String),
    Symbol(String),
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RegexpFlags;

    #[test]
    fn node_matcher_equality_ignores_attribute_order() {
        let ab = NodeMatcher::new("Foo")
            .with_attr("a", Matcher::literal(42))
            .with_attr("b", Matcher::literal(43));
        let ba = NodeMatcher::new("Foo")
            .with_attr("b", Matcher::literal(43))
            .with_attr("a", Matcher::literal(42));
        assert_eq!(ab, ba);
        assert_ne!(ab, NodeMatcher::new("Foo").with_attr("a", Matcher::literal(42)));
        assert_ne!(ab, NodeMatcher::new("Bar").with_attr("a", Matcher::literal(42)).with_attr("b", Matcher::literal(43)));
    }

    #[test]
    fn later_attribute_replaces_earlier() {
        let node = NodeMatcher::new("Foo")
            .with_attr("a", Matcher::literal(42))
            .with_attr("a", Matcher::literal(43));
        assert_eq!(node.attr_count(), 1);
        assert_eq!(node.attr("a"), Some(&Matcher::literal(43)));
    }

    #[test]
    fn equality_is_variant_aware() {
        let regexp = RegexpMatcher::new("foo", RegexpFlags::empty()).unwrap();
        assert_ne!(
            Matcher::SymbolRegexp(regexp.clone()),
            Matcher::StringRegexp(regexp.clone())
        );
        assert_ne!(
            Matcher::StringRegexp(regexp.clone()),
            Matcher::IndifferentRegexp(regexp.clone())
        );
        assert_eq!(Matcher::SymbolRegexp(regexp.clone()), Matcher::SymbolRegexp(regexp));
        assert_eq!(Matcher::Any, Matcher::Any);
        assert_ne!(Matcher::symbol("a"), Matcher::literal("a"));
    }

    #[test]
    fn or_flattens_into_existing_choice() {
        let choice = Matcher::literal(42)
            .or(Matcher::literal(43))
            .or(Matcher::literal(44));
        match choice {
            Matcher::Choice(choice) => assert_eq!(choice.alternatives().len(), 3),
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn choice_requires_an_alternative() {
        assert!(ChoiceMatcher::new(Vec::new()).is_none());
        assert!(Matcher::choice(Vec::new()).is_none());
        let single = Matcher::choice(vec![Matcher::Any]).expect("one alternative is enough");
        assert_eq!(single.to_string(), "any");
    }

    #[test]
    fn quantifier_rejects_inverted_bounds() {
        assert!(Quantifier::new(Matcher::Any, 3, Some(1), 1).is_none());
        assert!(Quantifier::new(Matcher::Any, 0, None, 0).is_none());
        let q = Quantifier::new(Matcher::Any, 1, Some(3), 2).expect("bounds are valid");
        assert_eq!((q.min(), q.max(), q.step()), (1, Some(3), 2));
    }

    #[test]
    fn named_quantifiers_use_expected_bounds() {
        let bounds = |q: Quantifier| (q.min(), q.max(), q.step());
        assert_eq!(bounds(Quantifier::zero_or_more(Matcher::Any)), (0, None, 1));
        assert_eq!(bounds(Quantifier::one_or_more(Matcher::Any)), (1, None, 1));
        assert_eq!(bounds(Quantifier::optional(Matcher::Any)), (0, Some(1), 1));
        assert_eq!(bounds(Quantifier::exactly(Matcher::Any, 3)), (3, Some(3), 1));
        assert_eq!(bounds(Quantifier::even(Matcher::Any)), (0, None, 2));
        assert_eq!(bounds(Quantifier::odd(Matcher::Any)), (1, None, 2));
    }
}

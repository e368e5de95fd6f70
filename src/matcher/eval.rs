use super::sequence::match_sequence;
use super::{Literal, Matcher, NodeMatcher};
use crate::tree::{Host, Value};

impl Matcher {
    /// Tests `value` against this pattern.
    ///
    /// Total over any value: a value of the wrong shape simply does not match.
    pub fn matches<N: Host>(&self, value: &Value<'_, N>) -> bool {
        match self {
            Matcher::Node(node) => match value {
                Value::Node(host) => node.matches_node(*host),
                _ => false,
            },
            Matcher::Choice(choice) => choice
                .alternatives()
                .iter()
                .any(|alternative| alternative.matches(value)),
            Matcher::Array(array) => match value {
                Value::Array(elements) => match_sequence(array.items(), elements),
                _ => false,
            },
            Matcher::Literal(literal) => literal.matches(value),
            Matcher::SymbolRegexp(regexp) => match value {
                Value::Symbol(name) => regexp.is_match(name),
                _ => false,
            },
            Matcher::StringRegexp(regexp) => match value {
                Value::String(text) => regexp.is_match(text),
                _ => false,
            },
            Matcher::IndifferentRegexp(regexp) => match value {
                Value::Symbol(text) | Value::String(text) => regexp.is_match(text),
                _ => false,
            },
            Matcher::Any => true,
        }
    }

    /// Tests a tree node against this pattern.
    pub fn matches_node<N: Host>(&self, node: &N) -> bool {
        self.matches(&Value::Node(node))
    }
}

impl NodeMatcher {
    /// Closed on the class, open on attributes: unlisted attributes are unconstrained, a listed
    /// attribute the host does not have never matches.
    pub fn matches_node<N: Host>(&self, node: &N) -> bool {
        node.class_name() == self.class_name()
            && self.attrs().all(|(name, matcher)| {
                node.attribute(name)
                    .is_some_and(|value| matcher.matches(&value))
            })
    }
}

impl Literal {
    pub fn matches<N>(&self, value: &Value<'_, N>) -> bool {
        match (self, value) {
            (Literal::Nil, Value::Nil) => true,
            (Literal::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Literal::Integer(expected), Value::Integer(actual)) => expected == actual,
            (Literal::String(expected), Value::String(actual))
            | (Literal::Symbol(expected), Value::Symbol(actual)) => expected.as_str() == *actual,
            _ => false,
        }
    }
}

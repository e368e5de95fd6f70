use smallvec::SmallVec;
use std::fmt::{self, Write};

use super::{Host, Value};
use crate::matcher::write_quoted;

/// An owned host tree node: a class name plus ordered attributes.
///
/// Setting an attribute that already exists replaces its value in place, so attribute order is
/// the order of first insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    class_name: String,
    attributes: Vec<(String, Attribute)>,
}

impl Node {
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            class_name: class_name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Attribute>,
    {
        self.set(name, value);
        self
    }

    pub fn set<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<Attribute>,
    {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl Host for Node {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn attribute(&self, name: &str) -> Option<Value<'_, Self>> {
        self.get(name).map(Attribute::as_value)
    }

    /// Pre-order: a node is visited before its attributes, attributes in insertion order,
    /// array elements in index order.
    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Self)) {
        let mut stack: SmallVec<[&'a Attribute; 16]> =
            self.attributes.iter().rev().map(|(_, value)| value).collect();

        while let Some(attribute) = stack.pop() {
            match attribute {
                Attribute::Node(node) => {
                    let node: &'a Node = node;
                    visit(node);
                    stack.extend(node.attributes.iter().rev().map(|(_, value)| value));
                }
                Attribute::Array(items) => stack.extend(items.iter().rev()),
                _ => {}
            }
        }
    }
}

/// Prints the node as pattern text that matches the node itself, e.g.
/// `Send<receiver = nil, name = :foo>`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)?;
        if self.attributes.is_empty() {
            return Ok(());
        }

        f.write_char('<')?;
        for (index, (name, value)) in self.attributes.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_char('>')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Nil,
    Bool(bool),
    Integer(i64),
    String(String),
    Symbol(String),
    Array(Vec<Attribute>),
    Node(Box<Node>),
}

impl Attribute {
    pub fn symbol<S: Into<String>>(name: S) -> Self {
        Attribute::Symbol(name.into())
    }

    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Attribute>,
    {
        Attribute::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn as_value(&self) -> Value<'_, Node> {
        match self {
            Attribute::Nil => Value::Nil,
            Attribute::Bool(value) => Value::Bool(*value),
            Attribute::Integer(value) => Value::Integer(*value),
            Attribute::String(value) => Value::String(value.as_str()),
            Attribute::Symbol(value) => Value::Symbol(value.as_str()),
            Attribute::Array(items) => Value::Array(items.iter().map(Attribute::as_value).collect()),
            Attribute::Node(node) => Value::Node(node.as_ref()),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Nil => f.write_str("nil"),
            Attribute::Bool(value) => write!(f, "{value}"),
            Attribute::Integer(value) => write!(f, "{value}"),
            Attribute::String(value) => write_quoted(f, value),
            Attribute::Symbol(name) => write!(f, ":{name}"),
            Attribute::Array(items) => {
                f.write_char('[')?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Attribute::Node(node) => write!(f, "{node}"),
        }
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Attribute::Bool(value)
    }
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::Integer(value)
    }
}

impl From<i32> for Attribute {
    fn from(value: i32) -> Self {
        Attribute::Integer(value.into())
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::String(value.to_string())
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Attribute::String(value)
    }
}

impl From<Node> for Attribute {
    fn from(value: Node) -> Self {
        Attribute::Node(Box::new(value))
    }
}

impl From<Vec<Attribute>> for Attribute {
    fn from(value: Vec<Attribute>) -> Self {
        Attribute::Array(value)
    }
}

impl<T: Into<Attribute>> From<Option<T>> for Attribute {
    fn from(value: Option<T>) -> Self {
        value.map_or(Attribute::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixnum(value: i64) -> Node {
        Node::new("FixnumLiteral").with("value", value)
    }

    #[test]
    fn set_replaces_existing_attribute_in_place() {
        let node = Node::new("Foo").with("a", 1).with("b", 2).with("a", 3);
        let names: Vec<&str> = node.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(node.get("a"), Some(&Attribute::Integer(3)));
    }

    #[test]
    fn attribute_exposes_host_values() {
        let node = Node::new("Foo")
            .with("n", Attribute::Nil)
            .with("s", "text")
            .with("y", Attribute::symbol("sym"))
            .with("list", Attribute::array([1, 2]));

        assert_eq!(node.attribute("n"), Some(Value::Nil));
        assert_eq!(node.attribute("s"), Some(Value::String("text")));
        assert_eq!(node.attribute("y"), Some(Value::Symbol("sym")));
        assert_eq!(
            node.attribute("list"),
            Some(Value::Array(vec![Value::Integer(1), Value::Integer(2)]))
        );
        assert_eq!(node.attribute("missing"), None);
    }

    #[test]
    fn walk_visits_descendants_in_pre_order() {
        let tree = Node::new("Send")
            .with(
                "receiver",
                Node::new("Send")
                    .with("receiver", fixnum(1))
                    .with("arguments", Attribute::array([fixnum(2)])),
            )
            .with("arguments", Attribute::array([fixnum(3), fixnum(4)]));

        let mut seen = Vec::new();
        tree.walk(&mut |node| {
            let label = match node.get("value") {
                Some(Attribute::Integer(value)) => value.to_string(),
                _ => node.class_name().to_string(),
            };
            seen.push(label);
        });

        assert_eq!(seen, vec!["Send", "1", "2", "3", "4"]);
    }

    #[test]
    fn prints_as_pattern_text() {
        let node = Node::new("Send")
            .with("receiver", Attribute::Nil)
            .with("name", Attribute::symbol("+"))
            .with("flags", Attribute::array([true, false]))
            .with("doc", "say \"hi\"\n")
            .with("arguments", Attribute::array([fixnum(-1)]));
        assert_eq!(
            node.to_string(),
            r#"Send<receiver = nil, name = :+, flags = [true, false], doc = "say \"hi\"\n", arguments = [FixnumLiteral<value = -1>]>"#
        );
        assert_eq!(Node::new("SelfNode").to_string(), "SelfNode");
    }

    #[test]
    fn walk_skips_the_root() {
        let leaf = fixnum(42);
        let mut count = 0;
        leaf.walk(&mut |_| count += 1);
        assert_eq!(count, 0);
    }
}

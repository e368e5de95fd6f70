mod builder;
mod node;

pub use builder::{Builder, BuilderError, RESERVED_WORDS, dsl_method_name};
pub use node::{Attribute, Node};

/// Read-only view of a host tree node, as seen by matchers.
///
/// Implementors expose a runtime type name, named attribute access and a deterministic walk
/// over their descendants. Nothing else is required; matchers never mutate the tree.
pub trait Host: Sized {
    fn class_name(&self) -> &str;

    /// Value of the attribute `name`, or `None` when the node has no such accessor.
    fn attribute(&self, name: &str) -> Option<Value<'_, Self>>;

    /// Visits every descendant of `self` exactly once, in a deterministic order. The node
    /// itself is not visited.
    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Self));
}

/// A host value: what an attribute accessor returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a, N> {
    Nil,
    Bool(bool),
    Integer(i64),
    String(&'a str),
    Symbol(&'a str),
    Array(Vec<Value<'a, N>>),
    Node(&'a N),
}

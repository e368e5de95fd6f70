use hashbrown::HashMap as FastHashMap;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::{Attribute, Node};

/// DSL names that would collide with keywords of the host language; they get a `_` prefix.
pub const RESERVED_WORDS: [&str; 15] = [
    "for", "if", "alias", "next", "not", "super", "when", "case", "while", "yield", "class",
    "module", "and", "break", "send",
];

static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym boundary pattern should compile")
});

static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z\d])([A-Z])").expect("word boundary pattern should compile")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("unknown node kind '{name}'")]
    UnknownNode { name: String },
    #[error("node kinds '{first}' and '{second}' share the builder name '{dsl_name}'")]
    DuplicateName {
        dsl_name: String,
        first: String,
        second: String,
    },
}

/// Snake-case builder name for a class name, `_`-prefixed when it is a reserved word.
///
/// `FixnumLiteral` becomes `fixnum_literal`, `HTTPRequest` becomes `http_request` and `Send`
/// becomes `_send`.
pub fn dsl_method_name(class_name: &str) -> String {
    let name = underscore(class_name);
    if RESERVED_WORDS.contains(&name.as_str()) {
        format!("_{name}")
    } else {
        name
    }
}

fn underscore(word: &str) -> String {
    let word = word.replace("::", "/");
    let word = ACRONYM_BOUNDARY.replace_all(&word, "${1}_${2}");
    let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Builds reference tree nodes from a fixed set of known node kinds, addressed by their
/// builder names.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    kinds: FastHashMap<String, String>,
}

impl Builder {
    pub fn new<I, S>(class_names: I) -> Result<Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kinds: FastHashMap<String, String> = FastHashMap::new();
        for class_name in class_names {
            let class_name = class_name.into();
            let dsl_name = dsl_method_name(&class_name);
            if let Some(first) = kinds.get(&dsl_name) {
                if *first == class_name {
                    continue;
                }
                return Err(BuilderError::DuplicateName {
                    dsl_name,
                    first: first.clone(),
                    second: class_name,
                });
            }
            kinds.insert(dsl_name, class_name);
        }
        Ok(Self { kinds })
    }

    pub fn class_name(&self, dsl_name: &str) -> Option<&str> {
        self.kinds.get(dsl_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn node<I, K, V>(&self, dsl_name: &str, attributes: I) -> Result<Node, BuilderError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Attribute>,
    {
        let class_name = self.class_name(dsl_name).ok_or_else(|| {
            tracing::event!(tracing::Level::DEBUG, operation = "build", name = %dsl_name, "unknown node kind");
            BuilderError::UnknownNode {
                name: dsl_name.to_string(),
            }
        })?;

        let mut node = Node::new(class_name);
        for (name, value) in attributes {
            node.set(name, value);
        }
        Ok(node)
    }

    /// A node of kind `dsl_name` without attributes.
    pub fn leaf(&self, dsl_name: &str) -> Result<Node, BuilderError> {
        self.node(dsl_name, std::iter::empty::<(String, Attribute)>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Host;

    fn builder() -> Builder {
        Builder::new(["FixnumLiteral", "Send", "ArrayLiteral", "If", "SelfNode"])
            .expect("kinds should be distinct")
    }

    #[test]
    fn converts_class_names_to_snake_case() {
        assert_eq!(dsl_method_name("FixnumLiteral"), "fixnum_literal");
        assert_eq!(dsl_method_name("HTTPRequest"), "http_request");
        assert_eq!(dsl_method_name("Node2Value"), "node2_value");
        assert_eq!(dsl_method_name("Ns::InnerNode"), "ns/inner_node");
    }

    #[test]
    fn prefixes_reserved_words() {
        assert_eq!(dsl_method_name("Send"), "_send");
        assert_eq!(dsl_method_name("If"), "_if");
        assert_eq!(dsl_method_name("Sender"), "sender");
    }

    #[test]
    fn builds_known_nodes() {
        let builder = builder();
        let node = builder
            .node("fixnum_literal", [("value", 42)])
            .expect("fixnum_literal is known");
        assert_eq!(node.class_name(), "FixnumLiteral");
        assert_eq!(node.get("value"), Some(&Attribute::Integer(42)));

        let send = builder
            .node(
                "_send",
                [
                    ("receiver", Attribute::from(builder.leaf("self_node").unwrap())),
                    ("name", Attribute::symbol("foo")),
                ],
            )
            .expect("_send is known");
        assert_eq!(send.class_name(), "Send");
    }

    #[test]
    fn rejects_unknown_nodes() {
        let err = builder()
            .node("send", [("name", Attribute::symbol("foo"))])
            .expect_err("reserved word needs its prefix");
        assert_eq!(
            err,
            BuilderError::UnknownNode {
                name: "send".to_string()
            }
        );
    }

    #[test]
    fn rejects_colliding_kinds() {
        let err = Builder::new(["FooBar", "Foo_Bar"]).expect_err("names collide");
        match err {
            BuilderError::DuplicateName { dsl_name, .. } => assert_eq!(dsl_name, "foo_bar"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

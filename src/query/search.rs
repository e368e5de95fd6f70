use super::Pattern;
use crate::parser::PatternResult;
use crate::tree::Host;

/// Whether `node` matches `pattern`.
///
/// Fails only when `pattern` is text that does not compile.
#[tracing::instrument(level = "trace", skip(node, pattern), fields(class = %node.class_name()))]
pub fn matches<N, P>(node: &N, pattern: &P) -> PatternResult<bool>
where
    N: Host,
    P: Pattern + ?Sized,
{
    let matcher = pattern.to_matcher()?;
    Ok(matcher.matches_node(node))
}

/// Every node of `tree` matching `pattern`, the root included, in walk order.
///
/// The pattern is compiled once before the walk starts.
#[tracing::instrument(level = "trace", skip(tree, pattern), fields(root = %tree.class_name()))]
pub fn find<'a, N, P>(tree: &'a N, pattern: &P) -> PatternResult<Vec<&'a N>>
where
    N: Host,
    P: Pattern + ?Sized,
{
    let matcher = pattern.to_matcher()?;

    let mut found = Vec::new();
    if matcher.matches_node(tree) {
        found.push(tree);
    }
    tree.walk(&mut |node| {
        if matcher.matches_node(node) {
            found.push(node);
        }
    });

    tracing::event!(
        tracing::Level::DEBUG,
        operation = "find",
        found = found.len() as u64
    );
    Ok(found)
}

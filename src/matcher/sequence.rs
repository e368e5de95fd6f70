use super::{ArrayItem, Quantifier};
use crate::tree::{Host, Value};

/// Matches `values` against `items`, left to right.
///
/// A plain item consumes exactly one element. A quantified item first consumes its minimum,
/// then tries the rest of the items after the shortest consumption, growing by `step`
/// elements on failure until `max` (or the end of `values`) is reached.
pub(crate) fn match_sequence<N: Host>(items: &[ArrayItem], values: &[Value<'_, N>]) -> bool {
    let Some((first, rest)) = items.split_first() else {
        return values.is_empty();
    };

    match first {
        ArrayItem::Single(matcher) => match values.split_first() {
            Some((head, tail)) => matcher.matches(head) && match_sequence(rest, tail),
            None => false,
        },
        ArrayItem::Quantified(quantifier) => match_quantified(quantifier, rest, values),
    }
}

fn match_quantified<N: Host>(
    quantifier: &Quantifier,
    rest: &[ArrayItem],
    values: &[Value<'_, N>],
) -> bool {
    let min = quantifier.min();
    if values.len() < min || !all_match(quantifier, &values[..min]) {
        return false;
    }

    let mut consumed = min;
    loop {
        if match_sequence(rest, &values[consumed..]) {
            return true;
        }

        let Some(next) = consumed.checked_add(quantifier.step()) else {
            return false;
        };
        let within_max = quantifier.max().is_none_or(|max| next <= max);
        if !within_max || next > values.len() {
            return false;
        }
        if !all_match(quantifier, &values[consumed..next]) {
            return false;
        }

        tracing::event!(
            tracing::Level::TRACE,
            operation = "backtrack",
            consumed = next as u64,
            remaining = (values.len() - next) as u64
        );
        consumed = next;
    }
}

fn all_match<N: Host>(quantifier: &Quantifier, values: &[Value<'_, N>]) -> bool {
    values.iter().all(|value| quantifier.matcher().matches(value))
}

use itertools::Itertools;

use crate::combinator::Combination;

/// Render a combination as a query-string suffix.
///
/// Pairs are emitted as `name=value` in insertion order, one per value, and
/// joined with `&`. Parameters without values contribute nothing. Returns an
/// empty string when no parameter carries a value, otherwise the suffix
/// starts with `?`.
pub fn serialize(combination: &Combination) -> String {
    let query = combination
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |value| format!("{name}={value}")))
        .join("&");
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

/// Split a suffix produced by [`serialize`] back into `(name, value)` pairs.
pub fn parse_suffix(suffix: &str) -> Vec<(String, String)> {
    let query = suffix.strip_prefix('?').unwrap_or(suffix);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

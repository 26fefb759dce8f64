//! Helpers for reading rendered `key = value` dumps.

/// Splits a rendered dump into `(key, value)` pairs, skipping blank lines.
///
/// Values keep their inner whitespace; only the separator is removed.
#[must_use]
pub fn rendered_pairs(rendered: &str) -> Vec<(&str, &str)> {
    rendered
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_once(" = ").unwrap_or((line, "")))
        .collect()
}

/// Keys of a rendered dump that start with `prefix`, in order.
#[must_use]
pub fn keys_under<'a>(rendered: &'a str, prefix: &str) -> Vec<&'a str> {
    rendered_pairs(rendered)
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with(prefix))
        .collect()
}

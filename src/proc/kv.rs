use std::collections::HashMap;

/// Builds a mapping from `key: value` lines. Splits at the first
/// colon, trims the value, keeps the last value for a duplicate key.
/// Lines without a colon are skipped.
pub fn dict(text: &str) -> HashMap<&str, &str> {
    text.lines().filter_map(|line| {
        let (key, value) = line.split_once(':')?;
        Some((key, value.trim()))
    }).collect()
}

//! Text helpers for Notion rich text

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref NON_SLUG_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Default property key holding a block's text
pub const TITLE_KEY: &str = "title";

/// Concatenate the text fragments stored under `key`
///
/// Notion rich text is a list of segments, each a list whose first slot is
/// the text: `{"title": [["Hello "], ["world", [["b"]]]]}`. Anything that
/// does not fit that shape contributes nothing, so malformed input yields
/// an empty string rather than an error.
pub fn extract_plain_text(value: &Value, key: &str) -> String {
    let Some(segments) = value.get(key).and_then(Value::as_array) else {
        return String::new();
    };

    segments
        .iter()
        .map(|segment| {
            segment
                .as_array()
                .and_then(|parts| parts.first())
                .and_then(Value::as_str)
                .unwrap_or("")
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Same as [`extract_plain_text`] with the `title` key
pub fn extract_title(value: &Value) -> String {
    extract_plain_text(value, TITLE_KEY)
}

/// Lowercase URL-safe form of a display string
///
/// Every run of characters outside `[a-z0-9]` becomes one hyphen, so
/// non-ASCII letters are dropped rather than transliterated.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

//! Keyword-suggestion payload helpers.
//!
//! Suggestions are a convenience feature: whatever goes wrong upstream, the
//! caller gets a well-formed payload with empty lists.

use std::collections::HashSet;

use serde_json::{json, Value};

/// The payload returned when there is nothing to suggest.
pub fn empty_suggestions() -> Value {
    json!({ "_embedded": { "attractions": [], "venues": [] } })
}

/// Whether a keyword is too empty to be worth asking the provider about.
pub fn is_blank_keyword(keyword: &str) -> bool {
    keyword.trim().is_empty()
}

/// Shortest trimmed keyword, in characters, worth an autocomplete request.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Most names offered in one autocomplete list.
pub const MAX_SUGGESTIONS: usize = 10;

/// Whether a keyword is long enough to ask for suggestions.
pub fn wants_suggestions(keyword: &str) -> bool {
    keyword.trim().chars().count() >= MIN_SUGGEST_CHARS
}

/// Autocomplete names from a suggestion payload.
///
/// Attraction names come first, then venue names. A name already offered
/// (compared case-insensitively) is skipped, and the list stops at
/// [`MAX_SUGGESTIONS`].
pub fn suggestion_names(payload: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    ["/_embedded/attractions", "/_embedded/venues"]
        .into_iter()
        .filter_map(|pointer| payload.pointer(pointer).and_then(Value::as_array))
        .flatten()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

//! Search categories and their ticketing-provider segment ids.

/// Search categories offered to the user, in display order.
pub const CATEGORIES: &[&str] = &[
    "All",
    "Music",
    "Sports",
    "Arts & Theatre",
    "Film",
    "Miscellaneous",
];

/// Map a category label to the provider segment id used to filter searches.
///
/// `"All"` and unknown labels map to `None`, which leaves the search
/// unfiltered.
pub fn segment_id(category: &str) -> Option<&'static str> {
    match category {
        "Music" => Some("KZFzniwnSyZfZ7v7nJ"),
        "Sports" => Some("KZFzniwnSyZfZ7v7nE"),
        "Arts & Theatre" => Some("KZFzniwnSyZfZ7v7na"),
        "Film" => Some("KZFzniwnSyZfZ7v7nn"),
        "Miscellaneous" => Some("KZFzniwnSyZfZ7v7n1"),
        _ => None,
    }
}

//! Ingredient list parsing for fridge searches.

/// Parse a free-form ingredient list into normalized ingredient names.
///
/// Splits on commas, semicolons and newlines; entries are trimmed,
/// lowercased, empties dropped, and duplicates removed while keeping
/// first-seen order.
pub fn parse_ingredient_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split([',', ';', '\n'])
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

//! Search-term helpers shared by the listing queries.

/// Normalize a free-text search term: trimmed, `None` when blank.
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE ... ESCAPE '\'` substring pattern, escaping the LIKE
/// wildcards so user input always matches literally.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

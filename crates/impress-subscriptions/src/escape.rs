//! HTML escaping for text interpolated into row markup.

/// Escape the five markup-significant characters.
///
/// `&` is handled in the same pass as the others, so already-present entity
/// text is escaped once and never re-scanned.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape optional text; absent input yields an empty string.
pub fn escape_optional(input: Option<&str>) -> String {
    input.map(escape_html).unwrap_or_default()
}

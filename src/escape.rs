//! Markup escaping for text placed inside element content or quoted attribute values.

/// Escape `&`, `<`, `>`, `"` and `'` so the text renders literally.
///
/// Single pass, so an entity produced for one character is never re-escaped by
/// a later replacement. Not idempotent: `escape(escape(s))` double-encodes `&`.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape optional text. Absent text becomes the empty string.
pub fn escape_opt(s: Option<&str>) -> String {
    s.map(escape).unwrap_or_default()
}

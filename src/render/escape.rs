//! Markup escaping for text runs and attribute values.

/// Escape the characters significant in markup text and double-quoted
/// attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

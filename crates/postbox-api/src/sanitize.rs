/// Replace characters that carry meaning in HTML with their entities.
///
/// Covers `& " ' < > / \` and the backtick, so stored text can be dropped
/// into a page or an attribute without becoming markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim, then escape. Missing input is treated as empty.
pub fn clean_text(input: Option<&str>) -> String {
    escape_html(input.unwrap_or_default().trim())
}

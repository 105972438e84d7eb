//! String literal decoding for docstrings.

/// Decodes the text of one Python string literal node.
///
/// Returns `None` for bytes and f-strings, which never count as docstrings.
pub(crate) fn decode_string_literal(text: &str) -> Option<String> {
    let quote_at = text.find(['"', '\''])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('b') || prefix.contains('t') {
        return None;
    }
    let raw = prefix.contains('r');

    let body = &text[quote_at..];
    let quote = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        &body[..3]
    } else {
        &body[..1]
    };
    let inner = body
        .strip_prefix(quote)
        .and_then(|b| b.strip_suffix(quote))
        .unwrap_or("");

    Some(if raw {
        inner.to_string()
    } else {
        unescape(inner)
    })
}

/// Resolves the escapes that matter for docstring layout. Unknown escapes
/// are kept verbatim, as Python does.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\n') => {}
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

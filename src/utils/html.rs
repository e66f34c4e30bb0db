//! HTML escaping for the form codec.
//!
//! - `escape()` - text content (labels, textarea bodies)
//! - `escape_attr()` - attribute values (input values, class lists)
//! - `unescape()` - entity decoding for values read back through `tl`

use std::borrow::Cow;

/// Characters that require escaping in text and attributes.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Borrows when nothing needs escaping.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Escape an attribute value.
///
/// Newlines are kept as `&#10;` so multi-line values survive attribute
/// normalisation in other parsers.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') {
        return escape_with(s, &ESCAPE_CHARS);
    }
    Cow::Owned(escape_with(s, &ESCAPE_CHARS).replace('\n', "&#10;"))
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Decode named entities and numeric character references.
///
/// Unknown entities are left as written.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities are short; anything longer is literal text.
        let Some(semi) = tail.find(';').filter(|&i| i <= 11) else {
            result.push('&');
            rest = &tail[1..];
            continue;
        };

        let entity = &tail[1..semi];
        match decode_entity(entity) {
            Some(c) => result.push(c),
            None => result.push_str(&tail[..=semi]),
        }
        rest = &tail[semi + 1..];
    }
    result.push_str(rest);

    Cow::Owned(result)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello world"), "hello world");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_attr_newlines() {
        assert_eq!(escape_attr("a\"b&c"), "a&quot;b&amp;c");
        assert_eq!(escape_attr("line one\nline two"), "line one&#10;line two");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("hello"), "hello");
        assert_eq!(unescape("&lt;script&gt;"), "<script>");
        assert_eq!(unescape("a &amp; b"), "a & b");
        assert_eq!(unescape("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(unescape("&#39;"), "'");
        assert_eq!(unescape("&#x27;"), "'");
        assert_eq!(unescape("&#10;"), "\n");
        assert_eq!(unescape("&nbsp;"), "\u{00A0}");
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape("&bogus; & done"), "&bogus; & done");
        assert_eq!(unescape("R&D"), "R&D");
    }

    #[test]
    fn test_escape_roundtrip() {
        let original = "Tom & \"Jerry\" <3\nsecond line";
        assert_eq!(unescape(&escape_attr(original)), original);
    }
}

//! Key case conversion between data keys and form labels.
//!
//! Labels shown in the form are title-cased keys (`draftMode` ->
//! `Draft Mode`); keys read back from the form are camel-cased labels
//! (`Draft Mode` -> `draftMode`). camelCase keys survive the trip
//! unchanged, other spellings are normalised to camelCase.

/// Convert a label (or any name) to a camelCase key.
///
/// - `"Draft Mode"` -> `"draftMode"` (first word lower, the rest capitalised)
/// - `"draftMode"` -> `"draftMode"` (already camelCase, first char lowered)
/// - `"Title"` -> `"title"` (single word lowered)
pub fn camel_case(s: &str) -> String {
    let s = s.trim();

    if s.contains(char::is_whitespace) {
        let mut out = String::with_capacity(s.len());
        for (i, word) in s.split_whitespace().enumerate() {
            if i == 0 {
                out.push_str(&word.to_lowercase());
            } else {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(&chars.as_str().to_lowercase());
                }
            }
        }
        return out;
    }

    if is_camel(s) {
        let mut chars = s.chars();
        return match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    s.to_lowercase()
}

/// A mixed-case word with an uppercase letter after the first position.
fn is_camel(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && s.chars().skip(1).any(char::is_uppercase)
}

/// Convert a data key into a human-readable label.
///
/// Splits on `_`, `-`, whitespace and camelCase boundaries, then
/// capitalises each word: `draft_mode`, `draft-mode` and `draftMode` all
/// become `"Draft Mode"`.
pub fn title_case(key: &str) -> String {
    split_words(key)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // `draftMode` splits before `M`; `HTMLParser` splits before `P`.
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_spaced() {
        assert_eq!(camel_case("Draft Mode"), "draftMode");
        assert_eq!(camel_case("Item 1"), "item1");
        assert_eq!(camel_case("  SEO   title  "), "seoTitle");
    }

    #[test]
    fn test_camel_case_passthrough() {
        assert_eq!(camel_case("draftMode"), "draftMode");
        assert_eq!(camel_case("DraftMode"), "draftMode");
    }

    #[test]
    fn test_camel_case_single_word() {
        assert_eq!(camel_case("Title"), "title");
        assert_eq!(camel_case("URL"), "url");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("title"), "Title");
        assert_eq!(title_case("draftMode"), "Draft Mode");
        assert_eq!(title_case("draft_mode"), "Draft Mode");
        assert_eq!(title_case("global-header"), "Global Header");
        assert_eq!(title_case("HTMLParser"), "HTML Parser");
        assert_eq!(title_case("item1"), "Item1");
    }

    #[test]
    fn test_title_then_camel_keeps_camel_keys() {
        for key in ["title", "draftMode", "seoTitle", "item2", "heroImageUrl"] {
            assert_eq!(camel_case(&title_case(key)), key);
        }
    }

    #[test]
    fn test_title_then_camel_normalises_other_keys() {
        assert_eq!(camel_case(&title_case("draft_mode")), "draftMode");
        assert_eq!(camel_case(&title_case("global-header")), "globalHeader");
    }
}

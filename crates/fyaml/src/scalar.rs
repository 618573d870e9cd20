//! Scalar quoting decisions for YAML output.
//!
//! Decides whether text can be written plain, needs double quotes, or fits
//! a literal block, such that parsing the output gives back the same text
//! and kind.

use std::borrow::Cow;

use fyaml_tree::{ScalarKind, classify};

/// Check if text can be written as a plain scalar without changing how it
/// parses.
///
/// The text must read back as a string, so `42`, `true` or `~` are quoted.
pub fn can_be_plain(s: &str, flow: bool) -> bool {
    classify(s) == ScalarKind::String && is_plain_safe(s, flow)
}

/// Check if a mapping key can be written plain.
pub fn can_be_plain_key(s: &str) -> bool {
    is_plain_safe(s, false)
}

fn is_plain_safe(s: &str, flow: bool) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return false;
    }
    if s.chars().any(char::is_control) {
        return false;
    }
    // Indicators that start some other kind of token
    if matches!(
        first,
        '[' | ']' | '{' | '}' | ',' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
    ) {
        return false;
    }
    // `- `, `? ` and `: ` are indicators, and so are the bare characters
    if matches!(first, '-' | '?' | ':') && s[1..].chars().next().is_none_or(|c| c == ' ') {
        return false;
    }
    if s.contains(": ") || s.ends_with(':') || s.contains(" #") {
        return false;
    }
    if s.starts_with("---") || s.starts_with("...") || s == "<<" {
        return false;
    }
    !(flow && s.contains([',', '[', ']', '{', '}']))
}

/// Chomping indicator for writing text as a literal block, or `None` if a
/// literal block would not read back as the same text.
pub fn literal_chomping(s: &str) -> Option<&'static str> {
    if !s.contains('\n') || s.chars().any(|c| c.is_control() && c != '\n') {
        return None;
    }
    // The first line sets the block's indentation.
    let first = s.split('\n').next().unwrap_or_default();
    if first.is_empty() || first.starts_with(' ') {
        return None;
    }
    let trailing = s.len() - s.trim_end_matches('\n').len();
    Some(match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    })
}

/// Lines of a literal block, without the break that ends the last one.
pub fn literal_lines(s: &str) -> impl Iterator<Item = &str> {
    s.strip_suffix('\n').unwrap_or(s).split('\n')
}

/// Escape a string for double-quoted output.
///
/// Returns the escaped content (without surrounding quotes).
pub fn escape_quoted(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| matches!(c, '"' | '\\') || c.is_control()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                result.push_str(&format!("\\x{code:02X}"));
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_can_be_plain() {
        // These should be plain
        assert!(can_be_plain("localhost", false));
        assert!(can_be_plain("hello world", false));
        assert!(can_be_plain("https://example.com/path", false));
        assert!(can_be_plain("-x", false));
        assert!(can_be_plain("a,b", false));
        assert!(can_be_plain("a#b", false));

        // These must be quoted
        assert!(!can_be_plain("", false)); // null
        assert!(!can_be_plain("42", false)); // integer
        assert!(!can_be_plain("yes", false)); // boolean
        assert!(!can_be_plain("1.5", false)); // real
        assert!(!can_be_plain(" padded", false));
        assert!(!can_be_plain("- item", false));
        assert!(!can_be_plain("-", false));
        assert!(!can_be_plain("key: value", false));
        assert!(!can_be_plain("trailing:", false));
        assert!(!can_be_plain("a #comment", false));
        assert!(!can_be_plain("*alias", false));
        assert!(!can_be_plain("[list", false));
        assert!(!can_be_plain("<<", false));
        assert!(!can_be_plain("tab\there", false));
        assert!(!can_be_plain("a,b", true));
    }

    #[test]
    fn test_plain_keys() {
        assert!(can_be_plain_key("port"));
        assert!(can_be_plain_key("8080"));
        assert!(!can_be_plain_key("<<"));
        assert!(!can_be_plain_key("a: b"));
        assert!(!can_be_plain_key(""));
    }

    #[test]
    fn test_literal_chomping() {
        assert_eq!(literal_chomping("a\nb"), Some("-"));
        assert_eq!(literal_chomping("a\nb\n"), Some(""));
        assert_eq!(literal_chomping("a\n\n"), Some("+"));
        assert_eq!(literal_chomping("single line"), None);
        assert_eq!(literal_chomping(" indented\nfirst"), None);
        assert_eq!(literal_chomping("\nleading break"), None);
        assert_eq!(literal_chomping("cr\r\nlf"), None);
    }

    #[test]
    fn test_literal_lines() {
        assert_eq!(literal_lines("a\n\nb\n").collect::<Vec<_>>(), ["a", "", "b"]);
        assert_eq!(literal_lines("a\n\n").collect::<Vec<_>>(), ["a", ""]);
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("hello"), "hello");
        assert_eq!(escape_quoted("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_quoted("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_quoted("path\\to\\file"), "path\\\\to\\\\file");
        assert_eq!(escape_quoted("bell\x07"), "bell\\x07");
    }
}

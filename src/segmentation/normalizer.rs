use once_cell::sync::Lazy;
use regex::Regex;

// @const: Any run of whitespace, line breaks included
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Collapse a piece of text into a single clean line.
///
/// Carriage returns, newlines, tabs and any other whitespace runs become one
/// space, and the result is trimmed. Empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

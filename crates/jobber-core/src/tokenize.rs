//! Tokenization shared by every metric.
//!
//! Text is split strictly on the ASCII space character. Tabs, newlines and
//! other whitespace stay inside tokens, and runs of spaces yield empty tokens.

/// Split `text` on single spaces without changing case.
///
/// The empty string yields no tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ').collect()
}

/// Lowercase `text` and split it on single spaces.
pub fn tokenize(text: &str) -> Vec<String> {
    split_tokens(text).into_iter().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(tokenize("The Quick FOX"), vec!["the", "quick", "fox"]);
    }

    #[test]
    fn empty_string_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(split_tokens("").is_empty());
    }

    #[test]
    fn splits_only_on_spaces() {
        assert_eq!(tokenize("a\tb c"), vec!["a\tb", "c"]);
        assert_eq!(tokenize("a  b"), vec!["a", "", "b"]);
        assert_eq!(tokenize(" a"), vec!["", "a"]);
    }

    #[test]
    fn keeps_punctuation() {
        assert_eq!(tokenize("Paris, France."), vec!["paris,", "france."]);
    }

    #[test]
    fn split_preserves_case() {
        assert_eq!(split_tokens("The Quick"), vec!["The", "Quick"]);
    }
}

//! Text cleanup and tokenization shared by both categorizers.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern"));

// Two or more word characters, matching the usual TF-IDF token rule.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static pattern"));

/// Lowercase and replace every character outside `[a-z0-9\s]` with a space.
pub fn clean_text(text: &str) -> String {
    NON_ALNUM.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Split lowercase text into word tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN.find_iter(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_punctuation() {
        assert_eq!(clean_text("UPI/Swiggy-Order#42"), "upi swiggy order 42");
        assert_eq!(clean_text("H&M"), "h m");
    }

    #[test]
    fn test_clean_text_keeps_whitespace() {
        assert_eq!(clean_text("Big  Bazaar"), "big  bazaar");
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        let tokens: Vec<_> = tokenize("h m amazon prime 4").collect();
        assert_eq!(tokens, vec!["amazon", "prime"]);
    }
}

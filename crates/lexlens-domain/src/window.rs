//! Extraction windows - character-prefix truncation for model stages
//!
//! Each model stage sees only a fixed character-count prefix of the full
//! document text (the summarizer a smaller window than the recognizer).
//! Windows count Unicode scalar values, not bytes, and never split a char.

/// Return the prefix of `text` containing at most `max_chars` characters.
///
/// Returns the whole string when it is shorter than the window. The slice
/// boundary always lands on a char boundary, so the result is valid UTF-8
/// by construction.
///
/// # Examples
///
/// ```
/// use lexlens_domain::char_prefix;
///
/// assert_eq!(char_prefix("hello", 3), "hel");
/// assert_eq!(char_prefix("hi", 10), "hi");
/// ```
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorter_than_window() {
        assert_eq!(char_prefix("abc", 1024), "abc");
        assert_eq!(char_prefix("", 1024), "");
    }

    #[test]
    fn test_exact_window() {
        let text = "a".repeat(1024);
        assert_eq!(char_prefix(&text, 1024), text);
    }

    #[test]
    fn test_longer_than_window() {
        let text = "a".repeat(1025);
        assert_eq!(char_prefix(&text, 1024).chars().count(), 1024);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 'é' is 2 bytes but 1 char
        let text = "é".repeat(10);
        let prefix = char_prefix(&text, 4);
        assert_eq!(prefix.chars().count(), 4);
        assert_eq!(prefix, "éééé");
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(char_prefix("abc", 0), "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the prefix never exceeds the window
        #[test]
        fn test_prefix_bounded(text in ".*", max in 0usize..2000) {
            let prefix = char_prefix(&text, max);
            prop_assert!(prefix.chars().count() <= max);
        }

        /// Property: the prefix is always a prefix of the input
        #[test]
        fn test_prefix_is_prefix(text in ".*", max in 0usize..2000) {
            let prefix = char_prefix(&text, max);
            prop_assert!(text.starts_with(prefix));
        }

        /// Property: short inputs pass through unchanged
        #[test]
        fn test_short_input_unchanged(text in ".{0,100}") {
            prop_assert_eq!(char_prefix(&text, 1024), text.as_str());
        }
    }
}

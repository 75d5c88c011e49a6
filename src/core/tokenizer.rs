//! Word segmentation.
//!
//! The pipeline only depends on the [`Tokenizer`] trait, so tests and library
//! users can plug in their own segmentation.

use unicode_segmentation::UnicodeSegmentation;

/// A lazy sequence of tokens borrowed from the input text.
pub type Tokens<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Splits text into word tokens.
///
/// Every call returns a fresh iterator, so a token sequence can be restarted
/// by tokenizing again.
pub trait Tokenizer {
    /// Returns the tokens of `text` in order.
    fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a>;
}

/// Tokenizer based on Unicode word boundaries (UAX #29).
///
/// Zero-width non-joiners and combining marks never split a word, so
/// `می‌روم` and `کتاب‌ها` stay single tokens. Segments without any letter or
/// digit (punctuation, emoji, whitespace) are dropped.
///
/// # Example
///
/// ```
/// use chatcloud::core::{Tokenizer, WordTokenizer};
///
/// let tokens: Vec<_> = WordTokenizer.tokenize("سلام، می\u{200C}روم!").collect();
/// assert_eq!(tokens, ["سلام", "می\u{200C}روم"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        Box::new(text.unicode_words())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        WordTokenizer::new().tokenize(text).collect()
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(tokens("سلام سلام دنیا"), ["سلام", "سلام", "دنیا"]);
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(tokens("سلام، خوبی؟"), ["سلام", "خوبی"]);
        assert_eq!(tokens("... !!!"), Vec::<&str>::new());
    }

    #[test]
    fn test_zwnj_keeps_word_together() {
        assert_eq!(tokens("کتاب\u{200C}ها را"), ["کتاب\u{200C}ها", "را"]);
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(tokens("Rust و پایتون"), ["Rust", "و", "پایتون"]);
    }

    #[test]
    fn test_restartable() {
        let tokenizer = WordTokenizer;
        let text = "یک دو سه";
        let first: Vec<_> = tokenizer.tokenize(text).collect();
        let second: Vec<_> = tokenizer.tokenize(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \n").is_empty());
    }
}

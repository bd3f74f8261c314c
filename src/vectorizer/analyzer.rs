use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{stop_words::ENGLISH_STOP_WORDS, token::TermFrequency};

/// Unicode word runs of two or more characters.
/// Punctuation and single-character tokens never match.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?u)\b\w\w+\b").unwrap_or_else(|e| unreachable!("token pattern is valid: {e}"))
});

/// Text analyzer
/// Turns raw text into terms: lower-cases, extracts word tokens,
/// and drops stop words.
///
/// The same analyzer must be used for corpus descriptions and queries,
/// so `Index` keeps the one it was built with.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stop_words: HashSet<Box<str>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::english()
    }
}

impl Analyzer {
    /// Analyzer with the fixed English stop-word list
    pub fn english() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Analyzer with a custom stop-word list (matched case-insensitively)
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase().into_boxed_str())
            .collect();
        Self { stop_words }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Split text into terms, in order of appearance
    ///
    /// # Arguments
    /// * `text` - raw UTF-8 text
    ///
    /// # Returns
    /// * `Vec<String>` - lower-cased terms, stop words removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.is_stop_word(t))
            .map(str::to_owned)
            .collect()
    }

    /// Count the terms of `text`
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        freq.add_terms(&self.tokenize(text));
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let a = Analyzer::english();
        assert_eq!(
            a.tokenize("Analyze DATA, build models!"),
            vec!["analyze", "data", "build", "models"]
        );
    }

    #[test]
    fn drops_stop_words_and_single_characters() {
        let a = Analyzer::english();
        assert_eq!(
            a.tokenize("I love analyzing data and building models"),
            vec!["love", "analyzing", "data", "building", "models"]
        );
        assert_eq!(a.tokenize("x y z 7"), Vec::<String>::new());
    }

    #[test]
    fn keeps_digits_and_unicode_words() {
        let a = Analyzer::english();
        assert_eq!(a.tokenize("Café owner, 24/7 shifts"), vec!["café", "owner", "24", "shifts"]);
    }

    #[test]
    fn empty_text_has_no_terms() {
        let a = Analyzer::english();
        assert!(a.tokenize("").is_empty());
        assert!(a.tokenize("   ...  !!").is_empty());
        assert_eq!(a.term_frequency("").term_sum(), 0);
    }

    #[test]
    fn custom_stop_words_are_case_insensitive() {
        let a = Analyzer::with_stop_words(["Rust"]);
        assert!(a.is_stop_word("rust"));
        assert_eq!(a.tokenize("RUST the language"), vec!["the", "language"]);
    }

    #[test]
    fn term_frequency_counts_repeats() {
        let a = Analyzer::english();
        let freq = a.term_frequency("cook cook food");
        assert_eq!(freq.term_count("cook"), 2);
        assert_eq!(freq.term_count("food"), 1);
        assert_eq!(freq.term_sum(), 3);
    }
}

// Bag-of-words tokenizer.
//
// Tokens are maximal runs of alphanumeric or underscore characters, lowercased,
// at least two characters long. Single letters ("a", "I") carry no signal for
// similarity and are dropped.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Splits text into lowercase word tokens, optionally removing stop words.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// A tokenizer that keeps every word.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tokenizer that removes the NLTK English stop word list.
    ///
    /// The short list only covers function words; content words common in
    /// academic prose ("research", "results", "significant") are kept.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }

    /// A tokenizer that removes the given words (matched case-insensitively).
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_alphanumeric() || ch == '_' {
                current.extend(ch.to_lowercase());
            } else if !current.is_empty() {
                self.push_token(&mut tokens, std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            self.push_token(&mut tokens, current);
        }

        tokens
    }

    fn push_token(&self, tokens: &mut Vec<String>, token: String) {
        if token.chars().count() >= 2 && !self.stop_words.contains(&token) {
            tokens.push(token);
        }
    }
}

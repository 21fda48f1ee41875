//! Word tokenization for indexing and scoring.
//!
//! Tokens are `\w+` runs: maximal runs of alphanumeric characters and
//! underscores. CJK ideographs are alphanumeric, so a run of CJK text becomes
//! a single token rather than being split per character. Tokens are
//! lowercased, stopwords are dropped, and tokens outside the configured
//! character-length bounds are dropped.

use docrecall_text::Stopwords;

/// A configured tokenizer, borrowing the process-wide stopword table.
pub struct Tokenizer<'a> {
    /// Shared stopword table.
    stopwords: &'a Stopwords,
    /// Shortest admitted token, in characters.
    min_len: usize,
    /// Longest admitted token, in characters.
    max_len: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer with the given length bounds.
    pub fn new(stopwords: &'a Stopwords, min_len: usize, max_len: usize) -> Self {
        Self {
            stopwords,
            min_len,
            max_len,
        }
    }

    /// Tokenizes text into lowercased, filtered terms.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|run| !run.is_empty())
            .map(str::to_lowercase)
            .filter(|token| {
                let chars = token.chars().count();
                chars >= self.min_len && chars <= self.max_len
            })
            .filter(|token| !self.stopwords.contains(token))
            .collect()
    }
}

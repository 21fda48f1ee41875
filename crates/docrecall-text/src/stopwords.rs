//! Stopword filtering for tokenization and keyword extraction.
//!
//! Combines standard English stopwords from the `stop-words` crate with a
//! small table of URL and markup noise that shows up constantly in scraped
//! documentation (link schemes, image extensions, markdown artifacts) and
//! carries no discriminative value for ranking.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A stopword filter for documentation text.
///
/// Uses a `HashSet` for O(1) lookup. All words are stored lowercase for
/// case-insensitive matching.
#[derive(Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a stopword filter with English stopwords plus markup noise.
    pub fn new() -> Self {
        let mut words: HashSet<String> = HashSet::new();

        // English stopwords from the stop-words crate (Stopwords ISO)
        for word in stop_words::get(LANGUAGE::English) {
            words.insert(word.to_ascii_lowercase());
        }

        let mut add_words = |slice: &[&str]| {
            for word in slice {
                words.insert(word.to_ascii_lowercase());
            }
        };
        add_words(URL_NOISE);
        add_words(MARKUP_NOISE);

        Self { words }
    }

    /// Checks if a term is a stopword. Case-insensitive for ASCII.
    pub fn contains(&self, term: &str) -> bool {
        let lower = term.to_ascii_lowercase();
        self.words.contains(&lower)
    }

    /// Returns the total number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stopwords are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// URL fragments that survive naive tokenization of scraped pages.
static URL_NOISE: &[&str] = &[
    "http", "https", "www", "com", "cn", "org", "net", "html", "htm", "php", "aspx",
];

/// Markdown and image artifacts common in scraped documentation.
static MARKUP_NOISE: &[&str] = &[
    "md", "png", "jpg", "jpeg", "gif", "svg", "img", "src", "href", "nbsp", "amp",
];

//! Result types shared across the engine.

use std::path::PathBuf;

use serde::Serialize;

/// Which part of the engine produced a heading match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchSource {
    /// BM25 page recall over TOC files.
    Recall,
    /// Keyword scan over TOC files (fallback).
    Anchor,
    /// Domain-noun grep over full page content (fallback).
    Grep,
}

/// A matched heading within a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    /// Heading level, 1-6.
    pub level: u8,
    /// Cleaned heading text without `#` markers.
    pub text: String,
    /// Cleaned heading line with `#` markers preserved.
    pub full_text: String,
    /// URL of the heading's inline link, if any.
    pub anchor: Option<String>,
    /// BM25 similarity against the combined query.
    pub bm25_sim: f64,
    /// Semantic similarity from the downstream re-ranking phase, when run.
    pub rerank_sim: Option<f64>,
    /// Heading text normalized for the re-ranking phase; present when
    /// predicate verbs are configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerank_text: Option<String>,
    /// Score cleared the basic threshold.
    pub is_basic: bool,
    /// Score cleared the precision threshold.
    pub is_precision: bool,
    /// Strategy that produced this heading.
    pub source: MatchSource,
    /// Content excerpt around the match, from the content-grep fallback.
    pub related_context: Option<String>,
}

/// A matched page with its qualifying headings.
///
/// Pages are keyed by `(doc_set, page_title)`; the pair is unique within a
/// search result after merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Doc-set the page belongs to.
    pub doc_set: String,
    /// Page title (the page directory name).
    pub page_title: String,
    /// Path to the page's TOC file.
    pub toc_path: PathBuf,
    /// Page-level score: the page-title BM25 score at recall time, the
    /// maximum heading score after merging.
    pub score: f64,
    /// Any heading cleared the basic threshold.
    pub is_basic: bool,
    /// Any heading cleared the precision threshold.
    pub is_precision: bool,
    /// Qualifying headings.
    pub headings: Vec<Heading>,
    /// Number of qualifying headings; equals `headings.len()`.
    pub heading_count: usize,
    /// Number of precision headings; at most `heading_count`.
    pub precision_count: usize,
}

impl Page {
    /// Recomputes the derived fields from the current headings.
    ///
    /// Page score becomes the maximum heading score, the match flags become
    /// the OR over headings, and the counts are refreshed.
    pub fn refresh_derived(&mut self) {
        self.heading_count = self.headings.len();
        self.precision_count = self.headings.iter().filter(|h| h.is_precision).count();
        self.score = self
            .headings
            .iter()
            .map(|h| h.bm25_sim)
            .fold(0.0, f64::max);
        self.is_basic = self.headings.iter().any(|h| h.is_basic);
        self.is_precision = self.headings.iter().any(|h| h.is_precision);
    }
}

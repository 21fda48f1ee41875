//! TOC keyword-scan fallback.
//!
//! When BM25 recall under-returns, this strategy drops scoring entirely and
//! greps the TOC files for query keywords. Presence of a keyword in a heading
//! line is the only signal: every hit is a basic match with a zero BM25
//! score, left for the downstream re-ranking phase to order.

use docrecall_document::{DocSetDir, discover_pages, parse_headings, read_page_file};
use docrecall_text::{Stopwords, is_search_keyword};
use regex::{Regex, RegexBuilder, escape};
use tracing::debug;

use crate::{Heading, MatchSource, Page, SearchQuery, SearchStrategy};

/// Keyword scan over TOC files.
pub struct AnchorSearch<'a> {
    /// Shared stopword table.
    stopwords: &'a Stopwords,
}

impl<'a> AnchorSearch<'a> {
    /// Creates the strategy.
    pub fn new(stopwords: &'a Stopwords) -> Self {
        Self { stopwords }
    }

    /// Extracts scan keywords from the query strings.
    ///
    /// CJK tokens are kept as-is; Latin tokens are kept when they are
    /// technical terms or not stopwords. Order is preserved, duplicates
    /// dropped.
    fn extract_keywords(&self, query: &SearchQuery) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();

        for text in &query.queries {
            for token in text
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .filter(|run| !run.is_empty())
            {
                let lower = token.to_lowercase();
                if is_search_keyword(&lower, self.stopwords) && !keywords.contains(&lower) {
                    keywords.push(lower);
                }
            }
        }

        keywords
    }

    /// Builds the case-insensitive alternation over the keywords.
    fn build_pattern(keywords: &[String]) -> Option<Regex> {
        if keywords.is_empty() {
            return None;
        }
        let alternation = keywords
            .iter()
            .map(|kw| escape(kw))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&format!("({alternation})"))
            .case_insensitive(true)
            .build()
            .ok()
    }
}

impl SearchStrategy for AnchorSearch<'_> {
    fn name(&self) -> &'static str {
        "anchor"
    }

    fn search(&self, query: &SearchQuery, doc_sets: &[DocSetDir]) -> Vec<Page> {
        let keywords = self.extract_keywords(query);
        let Some(pattern) = Self::build_pattern(&keywords) else {
            // No usable keywords: never scan
            return Vec::new();
        };
        debug!(keywords = keywords.len(), "anchor scan starting");

        let mut pages = Vec::new();
        for set in doc_sets {
            for files in discover_pages(set) {
                let Some(toc) = read_page_file(&files.toc_path) else {
                    debug!(path = %files.toc_path.display(), "skipping unreadable TOC");
                    continue;
                };

                let headings: Vec<Heading> = toc
                    .lines()
                    .filter(|line| pattern.is_match(line))
                    .flat_map(|line| parse_headings(line))
                    .map(|parsed| Heading {
                        level: parsed.level,
                        text: parsed.text,
                        full_text: parsed.full_text,
                        anchor: parsed.anchor,
                        bm25_sim: 0.0,
                        rerank_sim: None,
                        rerank_text: None,
                        is_basic: true,
                        is_precision: false,
                        source: MatchSource::Anchor,
                        related_context: None,
                    })
                    .collect();

                if headings.is_empty() {
                    continue;
                }

                pages.push(Page {
                    doc_set: files.doc_set,
                    page_title: files.page_title,
                    toc_path: files.toc_path,
                    score: 0.0,
                    is_basic: true,
                    is_precision: false,
                    heading_count: headings.len(),
                    precision_count: 0,
                    headings,
                });
            }
        }

        pages
    }
}

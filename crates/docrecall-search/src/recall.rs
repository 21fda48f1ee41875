//! BM25 page recall.
//!
//! The primary retrieval path. One BM25 index is built over every TOC text in
//! a doc-set, one document per page keyed by page title. Pages whose TOC
//! clears the page-title threshold move on to heading-level scoring, where
//! each heading is scored against the combined query with its own
//! single-document index (degenerating to a TF-IDF-like similarity).

use std::collections::HashMap;

use docrecall_config::SearchConfig;
use docrecall_document::{DocSetDir, PageFiles, discover_pages, parse_headings, read_page_file};
use docrecall_index::{Bm25Index, Tokenizer};
use docrecall_text::Stopwords;
use tracing::debug;

use crate::{Heading, MatchSource, Page, SearchQuery};

/// Page-level recall over one doc-set.
pub struct PageRecall<'a> {
    /// Engine configuration.
    config: &'a SearchConfig,
    /// Shared stopword table.
    stopwords: &'a Stopwords,
}

impl<'a> PageRecall<'a> {
    /// Creates a recall pass with the given configuration.
    pub fn new(config: &'a SearchConfig, stopwords: &'a Stopwords) -> Self {
        Self { config, stopwords }
    }

    /// Recalls pages from a doc-set for the given query.
    ///
    /// Returns pages clearing the page-title threshold that kept at least
    /// `min_headings` qualifying headings. An empty or all-stopword query
    /// recalls nothing.
    pub fn recall(&self, set: &DocSetDir, query: &SearchQuery) -> Vec<Page> {
        let tokenizer = Tokenizer::new(
            self.stopwords,
            self.config.min_token_length,
            self.config.max_token_length,
        );
        let query_tokens = tokenizer.tokenize(&query.combined_text());
        if query_tokens.is_empty() {
            return Vec::new();
        }

        // One document per page; unreadable TOCs contribute no terms
        let mut tocs: HashMap<String, (PageFiles, String)> = HashMap::new();
        let mut documents: Vec<(String, String)> = Vec::new();
        for page in discover_pages(set) {
            let toc = match read_page_file(&page.toc_path) {
                Some(toc) => toc,
                None => {
                    debug!(path = %page.toc_path.display(), "skipping unreadable TOC");
                    String::new()
                }
            };
            documents.push((page.page_title.clone(), toc.clone()));
            tocs.insert(page.page_title.clone(), (page, toc));
        }

        let index = Bm25Index::build(self.config.bm25, &tokenizer, documents);

        let mut pages = Vec::new();
        for ranked in index.rank(&query_tokens) {
            if ranked.score < self.config.threshold_page_title {
                // rank() sorts descending; nothing below can qualify
                break;
            }
            let Some((files, toc)) = tocs.get(&ranked.id) else {
                continue;
            };

            let headings = self.score_headings(&tokenizer, &query_tokens, toc);
            if headings.len() < self.config.min_headings {
                continue;
            }

            let page = Page {
                doc_set: files.doc_set.clone(),
                page_title: files.page_title.clone(),
                toc_path: files.toc_path.clone(),
                score: ranked.score,
                is_basic: true,
                // Set only by merging/re-ranking downstream
                is_precision: false,
                heading_count: headings.len(),
                precision_count: headings.iter().filter(|h| h.is_precision).count(),
                headings,
            };
            pages.push(page);
        }

        pages
    }

    /// Scores each TOC heading against the query with its own
    /// single-document index, keeping those that clear the basic threshold.
    fn score_headings(
        &self,
        tokenizer: &Tokenizer<'_>,
        query_tokens: &[String],
        toc: &str,
    ) -> Vec<Heading> {
        let mut kept = Vec::new();

        for parsed in parse_headings(toc) {
            let index = Bm25Index::build(
                self.config.bm25,
                tokenizer,
                [("heading".to_string(), parsed.full_text.clone())],
            );
            let sim = index.score(query_tokens, "heading");
            if sim < self.config.threshold_headings {
                continue;
            }

            kept.push(Heading {
                level: parsed.level,
                text: parsed.text,
                full_text: parsed.full_text,
                anchor: parsed.anchor,
                bm25_sim: sim,
                rerank_sim: None,
                rerank_text: None,
                is_basic: true,
                is_precision: sim >= self.config.threshold_precision,
                source: MatchSource::Recall,
                related_context: None,
            });
        }

        kept
    }
}

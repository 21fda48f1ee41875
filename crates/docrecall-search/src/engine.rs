//! The search engine: recall, fallback, merge.
//!
//! One engine invocation runs BM25 recall over every requested doc-set, and
//! when recall under-returns, escalates to the fallback strategies. All
//! strategy outputs flow through [`ResultMerger`], so the response is the
//! same whichever order, or threads, the strategies ran in.

use docrecall_config::{ConfigError, SearchConfig};
use docrecall_document::{DocSetDir, discover_doc_sets};
use docrecall_text::{Stopwords, preprocess_for_rerank, protected_keywords};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    AnchorSearch, ContextSearch, Page, PageRecall, ResultMerger, SearchQuery, SearchStrategy,
};

/// The complete result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// The search executed to completion. Zero matches is still a success;
    /// only configuration or environment failures prevent an outcome.
    pub success: bool,
    /// The TOC keyword-scan fallback ran.
    pub toc_fallback: bool,
    /// The content-grep fallback ran.
    pub grep_fallback: bool,
    /// The query strings, echoed back in insertion order.
    pub query: Vec<String>,
    /// Doc-sets that were searched, in discovery order.
    pub doc_sets_found: Vec<String>,
    /// Matched pages in canonical order.
    pub results: Vec<Page>,
}

/// Runs searches against one knowledge base.
pub struct SearchEngine {
    /// Validated engine configuration.
    config: SearchConfig,
    /// Stopword table shared by recall and the fallback strategies.
    stopwords: Stopwords,
}

impl SearchEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            stopwords: Stopwords::new(),
        })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Executes one search.
    ///
    /// Recall runs first over every requested doc-set. When it returns fewer
    /// pages than `min_page_titles` and fallback is enabled, the TOC scan
    /// runs, plus the content grep when domain nouns are available. Strategy
    /// outputs are merged into one canonical result set.
    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        let doc_sets: Vec<DocSetDir> = discover_doc_sets(&self.config.base_dir)
            .into_iter()
            .filter(|set| query.wants_doc_set(&set.name))
            .collect();
        let doc_sets_found: Vec<String> = doc_sets.iter().map(|s| s.name.clone()).collect();
        debug!(doc_sets = doc_sets_found.len(), "doc-set discovery done");

        let recall = PageRecall::new(&self.config, &self.stopwords);
        let mut recalled = Vec::new();
        for set in &doc_sets {
            recalled.extend(recall.recall(set, query));
        }
        let recalled_count = recalled.len();

        let mut merger = ResultMerger::new();
        merger.absorb(recalled);

        let fallback_needed =
            recalled_count < self.config.min_page_titles && !self.config.disable_fallback;
        let mut toc_fallback = false;
        let mut grep_fallback = false;
        if fallback_needed {
            info!(recalled = recalled_count, "recall under-returned, running fallback");
            let anchor = AnchorSearch::new(&self.stopwords);
            let context = (!query.effective_domain_nouns(&self.config).is_empty())
                .then(|| ContextSearch::new(&self.config));

            toc_fallback = true;
            grep_fallback = context.is_some();
            for pages in self.run_fallback(&anchor, context.as_ref(), query, &doc_sets) {
                merger.absorb(pages);
            }
        }

        let mut results = merger.finish();
        self.annotate_rerank_text(query, &mut results);
        SearchOutcome {
            success: true,
            toc_fallback,
            grep_fallback,
            query: query.queries.clone(),
            doc_sets_found,
            results,
        }
    }

    /// Attaches the normalized re-ranking text to every heading.
    ///
    /// Headings whose text carries a domain noun pass through unchanged;
    /// otherwise configured predicate verbs are stripped so the downstream
    /// reranker scores the topic noun, not the verb. Skipped entirely when no
    /// predicate verbs are configured.
    fn annotate_rerank_text(&self, query: &SearchQuery, results: &mut [Page]) {
        let verbs = query.effective_predicate_verbs(&self.config);
        if verbs.is_empty() {
            return;
        }
        let nouns = query.effective_domain_nouns(&self.config);
        let protected = protected_keywords(&self.config.skip_keywords, nouns);

        for page in results {
            for heading in &mut page.headings {
                heading.rerank_text =
                    Some(preprocess_for_rerank(&heading.text, nouns, verbs, &protected));
            }
        }
    }

    /// Runs the fallback strategies, serially or on scoped threads.
    ///
    /// A panicked strategy thread contributes nothing; merging the surviving
    /// outputs is the sole synchronization point.
    fn run_fallback(
        &self,
        anchor: &AnchorSearch<'_>,
        context: Option<&ContextSearch<'_>>,
        query: &SearchQuery,
        doc_sets: &[DocSetDir],
    ) -> Vec<Vec<Page>> {
        let mut strategies: Vec<&dyn SearchStrategy> = vec![anchor];
        if let Some(context) = context {
            strategies.push(context);
        }

        if !self.config.parallel_fallback {
            return strategies
                .iter()
                .map(|s| self.run_strategy(*s, query, doc_sets))
                .collect();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = strategies
                .iter()
                .map(|&s| scope.spawn(move || self.run_strategy(s, query, doc_sets)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(pages) => pages,
                    Err(_) => {
                        tracing::error!("fallback strategy thread panicked");
                        Vec::new()
                    }
                })
                .collect()
        })
    }

    /// Runs one strategy and logs its result size.
    fn run_strategy(
        &self,
        strategy: &dyn SearchStrategy,
        query: &SearchQuery,
        doc_sets: &[DocSetDir],
    ) -> Vec<Page> {
        let pages = strategy.search(query, doc_sets);
        debug!(
            strategy = strategy.name(),
            pages = pages.len(),
            "fallback strategy finished"
        );
        pages
    }
}

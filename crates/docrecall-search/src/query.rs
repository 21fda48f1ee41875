//! The search request as the engine sees it.

use docrecall_config::SearchConfig;

/// One search request.
///
/// Query strings keep their insertion order; that order defines how they are
/// concatenated into the combined scoring text. The vocabularies override the
/// configured ones when non-empty.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Query strings, in insertion order.
    pub queries: Vec<String>,
    /// Doc-sets to search. Empty means all.
    pub doc_sets: Vec<String>,
    /// Domain nouns for this request; overrides the configured list.
    pub domain_nouns: Vec<String>,
    /// Predicate verbs for this request; overrides the configured list.
    pub predicate_verbs: Vec<String>,
}

impl SearchQuery {
    /// Creates a request from plain query strings.
    pub fn new(queries: Vec<String>) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    /// The combined query text used for BM25 scoring: all query strings
    /// joined with a space, in insertion order.
    pub fn combined_text(&self) -> String {
        self.queries.join(" ")
    }

    /// Effective domain nouns: the request's own, or the configured ones.
    pub fn effective_domain_nouns<'a>(&'a self, config: &'a SearchConfig) -> &'a [String] {
        if self.domain_nouns.is_empty() {
            &config.domain_nouns
        } else {
            &self.domain_nouns
        }
    }

    /// Effective predicate verbs: the request's own, or the configured ones.
    pub fn effective_predicate_verbs<'a>(&'a self, config: &'a SearchConfig) -> &'a [String] {
        if self.predicate_verbs.is_empty() {
            &config.predicate_verbs
        } else {
            &self.predicate_verbs
        }
    }

    /// Whether a doc-set name passes the request's filter.
    pub fn wants_doc_set(&self, name: &str) -> bool {
        self.doc_sets.is_empty() || self.doc_sets.iter().any(|s| s == name)
    }
}

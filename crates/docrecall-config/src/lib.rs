//! Configuration system for docrecall.
//!
//! The engine is configured per invocation: the CLI supplies flags, an
//! optional `docrecall.toml` in the knowledge-base directory supplies
//! defaults, and everything is validated up front before any search runs.
//! Out-of-range parameters are structured errors, never clamped.

#![warn(missing_docs)]

mod error;
mod file;
mod validate;

use std::path::PathBuf;

pub use error::ConfigError;
pub use file::{CONFIG_FILENAME, FileConfig, load_file_config};

/// Default BM25 `k1` term-frequency saturation parameter.
pub const DEFAULT_BM25_K1: f64 = 1.5;
/// Default BM25 `b` length-normalization parameter.
pub const DEFAULT_BM25_B: f64 = 0.75;
/// Default minimum page-title score for a page to enter heading scoring.
pub const DEFAULT_THRESHOLD_PAGE_TITLE: f64 = 0.15;
/// Default minimum heading score for a basic match.
pub const DEFAULT_THRESHOLD_HEADINGS: f64 = 0.25;
/// Default minimum heading score for a precision match.
pub const DEFAULT_THRESHOLD_PRECISION: f64 = 0.45;
/// Default minimum recalled page count before fallback strategies run.
pub const DEFAULT_MIN_PAGE_TITLES: usize = 1;
/// Default minimum surviving headings for a page to be kept.
pub const DEFAULT_MIN_HEADINGS: usize = 1;
/// Default shortest token admitted by the tokenizer, in characters.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;
/// Default longest token admitted by the tokenizer, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 40;
/// Default backward-scan window when looking for an enclosing heading.
pub const DEFAULT_HEADING_SCAN_WINDOW: usize = 100;
/// Default symmetric context window around a content match, in lines.
pub const DEFAULT_CONTEXT_WINDOW_LINES: usize = 5;
/// Default minimum word count before the context window stops expanding.
pub const DEFAULT_MIN_CONTEXT_WORDS: usize = 30;
/// Default maximum number of context-window expansion steps.
pub const DEFAULT_MAX_CONTEXT_EXPANSIONS: usize = 5;
/// Default global cap on content-grep fallback results across all doc-sets.
pub const DEFAULT_MAX_GREP_RESULTS: usize = 20;
/// Default similarity threshold passed through to the re-ranking phase.
pub const DEFAULT_RERANK_THRESHOLD: f64 = 0.5;
/// Default CJK-ratio threshold passed through to the re-ranking phase.
pub const DEFAULT_RERANK_LANG_THRESHOLD: f64 = 0.6;

/// Okapi BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation, valid in `[0, 5]`.
    pub k1: f64,
    /// Document-length normalization, valid in `[0, 1]`.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_BM25_K1,
            b: DEFAULT_BM25_B,
        }
    }
}

/// Parameters consumed by the downstream re-ranking phase.
///
/// The engine does not act on these; they are validated here and echoed in
/// the response for the collaborator that does.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankParams {
    /// Minimum semantic similarity for a heading to survive re-ranking.
    pub threshold: f64,
    /// Optional cap on headings sent to the reranker.
    pub top_k: Option<usize>,
    /// CJK-ratio threshold for the reranker's language detection.
    pub lang_threshold: f64,
}

impl Default for RerankParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RERANK_THRESHOLD,
            top_k: None,
            lang_threshold: DEFAULT_RERANK_LANG_THRESHOLD,
        }
    }
}

/// Fully resolved engine configuration for one search invocation.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Root directory containing the doc-set trees.
    pub base_dir: PathBuf,
    /// BM25 scoring parameters.
    pub bm25: Bm25Params,
    /// Minimum page-title score for heading-level scoring, in `[0, 1]`.
    pub threshold_page_title: f64,
    /// Minimum heading score for a basic match, in `[0, 1]`.
    pub threshold_headings: f64,
    /// Minimum heading score for a precision match, in `[0, 1]`.
    pub threshold_precision: f64,
    /// Fallback strategies run when fewer pages than this are recalled.
    pub min_page_titles: usize,
    /// Pages with fewer surviving headings than this are dropped.
    pub min_headings: usize,
    /// Disables the fallback strategies entirely.
    pub disable_fallback: bool,
    /// Runs the fallback strategies on separate threads instead of serially.
    pub parallel_fallback: bool,
    /// Shortest token admitted by the tokenizer, in characters.
    pub min_token_length: usize,
    /// Longest token admitted by the tokenizer, in characters.
    pub max_token_length: usize,
    /// Backward-scan window for finding an enclosing heading, in lines.
    pub heading_scan_window: usize,
    /// Symmetric context window around a content match, in lines.
    pub context_window_lines: usize,
    /// Minimum word count before the context window stops expanding.
    pub min_context_words: usize,
    /// Maximum number of context-window expansion steps.
    pub max_context_expansions: usize,
    /// Global cap on content-grep fallback results across all doc-sets.
    pub max_grep_results: usize,
    /// Domain nouns anchoring topics; the only vocabulary the content-grep
    /// fallback matches on.
    pub domain_nouns: Vec<String>,
    /// Generic predicate verbs stripped before re-ranking.
    pub predicate_verbs: Vec<String>,
    /// Verbs that are never stripped when they are also domain nouns.
    pub skip_keywords: Vec<String>,
    /// Parameters echoed to the downstream re-ranking phase.
    pub rerank: RerankParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            bm25: Bm25Params::default(),
            threshold_page_title: DEFAULT_THRESHOLD_PAGE_TITLE,
            threshold_headings: DEFAULT_THRESHOLD_HEADINGS,
            threshold_precision: DEFAULT_THRESHOLD_PRECISION,
            min_page_titles: DEFAULT_MIN_PAGE_TITLES,
            min_headings: DEFAULT_MIN_HEADINGS,
            disable_fallback: false,
            parallel_fallback: false,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            heading_scan_window: DEFAULT_HEADING_SCAN_WINDOW,
            context_window_lines: DEFAULT_CONTEXT_WINDOW_LINES,
            min_context_words: DEFAULT_MIN_CONTEXT_WORDS,
            max_context_expansions: DEFAULT_MAX_CONTEXT_EXPANSIONS,
            max_grep_results: DEFAULT_MAX_GREP_RESULTS,
            domain_nouns: Vec::new(),
            predicate_verbs: Vec::new(),
            skip_keywords: Vec::new(),
            rerank: RerankParams::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration rooted at the given knowledge-base directory,
    /// with all other parameters at their defaults.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Loads `docrecall.toml` from the base directory, if present, and folds
    /// its values into this configuration.
    ///
    /// Values already set by the caller are overwritten by file values only
    /// when [`FileConfig`] carries them; callers applying CLI overrides should
    /// do so after this call.
    pub fn apply_base_dir_file(&mut self) -> Result<(), ConfigError> {
        if let Some(file) = load_file_config(&self.base_dir)? {
            file.apply(self);
        }
        Ok(())
    }

    /// Validates every parameter, returning the first violation found.
    ///
    /// Checks numeric ranges, count minimums, token-length ordering, and that
    /// the base directory exists. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
    }
}

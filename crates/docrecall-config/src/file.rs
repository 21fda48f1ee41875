//! Optional TOML configuration file support.
//!
//! A knowledge base may carry a `docrecall.toml` at its root supplying
//! defaults for thresholds, BM25 parameters, and the domain-noun / predicate
//! -verb vocabularies. Every field is optional; absent fields leave the
//! in-memory configuration untouched. CLI flags are applied after the file,
//! so they always win.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, SearchConfig};

/// Name of the per-knowledge-base configuration file.
pub const CONFIG_FILENAME: &str = "docrecall.toml";

/// Raw, partially specified configuration as read from `docrecall.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// BM25 `k1` override.
    pub bm25_k1: Option<f64>,
    /// BM25 `b` override.
    pub bm25_b: Option<f64>,
    /// Page-title threshold override.
    pub threshold_page_title: Option<f64>,
    /// Heading threshold override.
    pub threshold_headings: Option<f64>,
    /// Precision threshold override.
    pub threshold_precision: Option<f64>,
    /// Minimum recalled pages before fallback runs.
    pub min_page_titles: Option<usize>,
    /// Minimum surviving headings per page.
    pub min_headings: Option<usize>,
    /// Run fallback strategies in parallel.
    pub parallel_fallback: Option<bool>,
    /// Global cap on content-grep results.
    pub max_grep_results: Option<usize>,
    /// Domain nouns for this knowledge base.
    pub domain_nouns: Vec<String>,
    /// Predicate verbs stripped before re-ranking.
    pub predicate_verbs: Vec<String>,
    /// Verbs protected from stripping when they are also domain nouns.
    pub skip_keywords: Vec<String>,
}

impl FileConfig {
    /// Folds the file values into a resolved configuration.
    ///
    /// Scalar overrides replace the current value when present; vocabulary
    /// lists replace the current lists only when non-empty.
    pub fn apply(&self, config: &mut SearchConfig) {
        if let Some(k1) = self.bm25_k1 {
            config.bm25.k1 = k1;
        }
        if let Some(b) = self.bm25_b {
            config.bm25.b = b;
        }
        if let Some(t) = self.threshold_page_title {
            config.threshold_page_title = t;
        }
        if let Some(t) = self.threshold_headings {
            config.threshold_headings = t;
        }
        if let Some(t) = self.threshold_precision {
            config.threshold_precision = t;
        }
        if let Some(n) = self.min_page_titles {
            config.min_page_titles = n;
        }
        if let Some(n) = self.min_headings {
            config.min_headings = n;
        }
        if let Some(p) = self.parallel_fallback {
            config.parallel_fallback = p;
        }
        if let Some(n) = self.max_grep_results {
            config.max_grep_results = n;
        }
        if !self.domain_nouns.is_empty() {
            config.domain_nouns = self.domain_nouns.clone();
        }
        if !self.predicate_verbs.is_empty() {
            config.predicate_verbs = self.predicate_verbs.clone();
        }
        if !self.skip_keywords.is_empty() {
            config.skip_keywords = self.skip_keywords.clone();
        }
    }
}

/// Loads `docrecall.toml` from the given directory, if it exists.
///
/// Returns `Ok(None)` when the file is absent. A file that exists but cannot
/// be read or parsed is a configuration error: a malformed file must not be
/// silently ignored.
pub fn load_file_config(base_dir: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let path = base_dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
        path: path.clone(),
        source,
    })?;

    let parsed =
        toml::from_str(&raw).map_err(|source| ConfigError::ParseToml { path, source })?;

    Ok(Some(parsed))
}

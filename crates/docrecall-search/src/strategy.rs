//! The fallback-strategy contract.

use docrecall_document::DocSetDir;

use crate::{Page, SearchQuery};

/// A fallback search strategy.
///
/// Strategies run when primary recall under-returns. They are read-only over
/// the filesystem and hold no mutable state, so the engine may run them on
/// separate threads; merging afterwards is the sole synchronization point.
pub trait SearchStrategy: Sync {
    /// Strategy name, used for logging.
    fn name(&self) -> &'static str;

    /// Searches the given doc-sets, returning per-page heading matches.
    fn search(&self, query: &SearchQuery, doc_sets: &[DocSetDir]) -> Vec<Page>;
}

//! The docrecall search engine.
//!
//! Retrieval runs in up to three phases over a knowledge base of markdown
//! doc-sets. BM25 recall over TOC files is the primary path; when it
//! under-returns, a keyword scan of the TOCs and a domain-noun grep of full
//! page content escalate coverage. Strategy outputs are merged into one
//! canonical, order-independent result set of pages and headings, ready for
//! a downstream semantic re-ranking phase.

#![warn(missing_docs)]

mod anchor;
mod context;
mod engine;
mod merge;
mod query;
mod recall;
mod strategy;
mod types;

pub use anchor::AnchorSearch;
pub use context::ContextSearch;
pub use engine::{SearchEngine, SearchOutcome};
pub use merge::ResultMerger;
pub use query::SearchQuery;
pub use recall::PageRecall;
pub use strategy::SearchStrategy;
pub use types::{Heading, MatchSource, Page};

//! Text preprocessing for docrecall.
//!
//! This crate holds the language-sensitive text logic shared by the retrieval
//! engine:
//! - CJK-ratio language detection
//! - Stopword filtering (English stopwords plus URL/markup noise)
//! - Technical-term recognition for keyword extraction
//! - Suffix-stripping stemming for domain-noun matching
//! - Predicate-verb stripping used to normalize text before re-ranking
//!
//! All word tables are immutable statics compiled once at process start and
//! passed by reference; nothing in this crate holds per-call mutable state.

#![warn(missing_docs)]

mod keywords;
mod language;
mod rerank;
mod stem;
mod stopwords;

pub use keywords::{is_search_keyword, is_technical_term};
pub use language::{DEFAULT_LANG_THRESHOLD, Lang, cjk_ratio, contains_cjk, detect_language};
pub use rerank::{contains_domain_noun, preprocess_for_rerank, protected_keywords};
pub use stem::stem;
pub use stopwords::Stopwords;

//! Ephemeral BM25 indexing for docrecall.
//!
//! The index is rebuilt from the candidate documents on every search call and
//! dropped when the call returns: no persistence, no shared mutable state.
//! Term vectors, document lengths, and the IDF cache live only as long as the
//! [`Bm25Index`] value itself.

#![warn(missing_docs)]

mod bm25;
mod tokenizer;

pub use bm25::{Bm25Index, RankedDoc};
pub use tokenizer::Tokenizer;

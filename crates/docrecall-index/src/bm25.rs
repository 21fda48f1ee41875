//! Okapi BM25 scoring over an in-memory corpus.
//!
//! One index is built per search call from the candidate documents. The
//! formula is standard Okapi BM25:
//!
//! ```text
//! score(q, d) = Σ_t IDF(t) · tf(t,d)·(k1+1) / (tf(t,d) + k1·(1 − b + b·|d|/avgdl))
//! IDF(t)      = ln((N − df(t) + 0.5) / (df(t) + 0.5) + 1)
//! ```
//!
//! Ranking ties break by the original document insertion order: the sort is
//! stable and documents keep their enumeration position.

use std::collections::HashMap;

use docrecall_config::Bm25Params;

use crate::Tokenizer;

/// Term-frequency vector and length for one indexed document.
struct DocEntry {
    /// External document identifier.
    id: String,
    /// Term frequencies.
    tf: HashMap<String, usize>,
    /// Document length in tokens.
    len: usize,
}

/// A document with its BM25 score against some query.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDoc {
    /// External document identifier.
    pub id: String,
    /// BM25 score.
    pub score: f64,
}

/// An ephemeral BM25 index over a set of documents.
pub struct Bm25Index {
    /// Scoring parameters.
    params: Bm25Params,
    /// Documents in insertion order.
    docs: Vec<DocEntry>,
    /// Document id to position lookup.
    positions: HashMap<String, usize>,
    /// IDF cache keyed by lowercased term, computed once at build time.
    idf: HashMap<String, f64>,
    /// Average document length in tokens.
    avgdl: f64,
}

impl Bm25Index {
    /// Builds an index over the given `(id, text)` documents.
    ///
    /// Documents are tokenized with the supplied tokenizer; enumeration order
    /// is preserved for tie-breaking. A later duplicate id replaces the
    /// earlier text but keeps the original position.
    pub fn build<I>(params: Bm25Params, tokenizer: &Tokenizer<'_>, documents: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut docs: Vec<DocEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (id, text) in documents {
            let tokens = tokenizer.tokenize(&text);
            let mut tf: HashMap<String, usize> = HashMap::new();
            for token in &tokens {
                *tf.entry(token.clone()).or_insert(0) += 1;
            }
            let entry = DocEntry {
                id: id.clone(),
                len: tokens.len(),
                tf,
            };

            if let Some(&pos) = positions.get(&id) {
                docs[pos] = entry;
            } else {
                positions.insert(id, docs.len());
                docs.push(entry);
            }
        }

        // Document frequencies over the final corpus
        let mut df: HashMap<String, usize> = HashMap::new();
        for doc in &docs {
            for term in doc.tf.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let idf = df
            .into_iter()
            .map(|(term, df_t)| {
                let df_t = df_t as f64;
                let value = ((n - df_t + 0.5) / (df_t + 0.5) + 1.0).ln();
                (term, value)
            })
            .collect();

        let total_len: usize = docs.iter().map(|d| d.len).sum();
        let avgdl = if docs.is_empty() {
            0.0
        } else {
            total_len as f64 / docs.len() as f64
        };

        Self {
            params,
            docs,
            positions,
            idf,
            avgdl,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns the cached IDF for a term, or 0.0 for unseen terms.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(&term.to_lowercase()).copied().unwrap_or(0.0)
    }

    /// Scores a document against pre-tokenized query terms.
    ///
    /// Unknown document ids score 0.0, as does an empty query.
    pub fn score(&self, query_tokens: &[String], doc_id: &str) -> f64 {
        let Some(&pos) = self.positions.get(doc_id) else {
            return 0.0;
        };
        self.score_entry(query_tokens, &self.docs[pos])
    }

    /// Scores every document against the query, sorted by score descending.
    ///
    /// The sort is stable, so equal scores keep document insertion order.
    /// An empty corpus or a query with no surviving tokens yields an empty
    /// vector, never an error.
    pub fn rank(&self, query_tokens: &[String]) -> Vec<RankedDoc> {
        if self.docs.is_empty() || query_tokens.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedDoc> = self
            .docs
            .iter()
            .map(|doc| RankedDoc {
                id: doc.id.clone(),
                score: self.score_entry(query_tokens, doc),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Okapi BM25 for one document.
    fn score_entry(&self, query_tokens: &[String], doc: &DocEntry) -> f64 {
        let k1 = self.params.k1;
        let b = self.params.b;
        // avgdl is 0 only when every document tokenized to nothing; every tf
        // is 0 then, so the divisor value is irrelevant as long as it is not 0
        let avgdl = if self.avgdl > 0.0 { self.avgdl } else { 1.0 };
        let norm = k1 * (1.0 - b + b * doc.len as f64 / avgdl);

        let mut score = 0.0;
        for term in query_tokens {
            let tf = doc.tf.get(term).copied().unwrap_or(0) as f64;
            if tf == 0.0 {
                continue;
            }
            let idf = self.idf.get(term).copied().unwrap_or(0.0);
            score += idf * (tf * (k1 + 1.0)) / (tf + norm);
        }
        score
    }
}

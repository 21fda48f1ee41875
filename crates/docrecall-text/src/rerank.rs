//! Text normalization applied before semantic re-ranking.
//!
//! Generic predicate verbs ("create", "configure", 删除...) inflate semantic
//! similarity between a query and headings that merely share the verb, drowning
//! out the noun that actually identifies the topic. When a text contains none
//! of the configured domain nouns, the configured predicate verbs are stripped
//! from it; a protected-keyword set (the skip list intersected with the domain
//! nouns) is never stripped.

use std::collections::HashSet;

use crate::{contains_cjk, stem};

/// Checks whether a text contains any of the configured domain nouns.
///
/// CJK nouns match by plain substring. Latin nouns match by exact
/// (case-insensitive) substring, or by suffix-stripping stem equality against
/// any word in the text, so "workflows" in the text matches the noun
/// "workflow".
pub fn contains_domain_noun(text: &str, nouns: &[String]) -> bool {
    if nouns.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();

    for noun in nouns {
        if contains_cjk(noun) {
            if text.contains(noun.as_str()) {
                return true;
            }
            continue;
        }

        let noun_lower = noun.to_lowercase();
        if lower.contains(&noun_lower) {
            return true;
        }

        let noun_stem = stem(&noun_lower);
        if lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| !word.is_empty() && stem(word) == noun_stem)
        {
            return true;
        }
    }

    false
}

/// Computes the protected-keyword set: skip-list entries that are also
/// configured domain nouns. Protected keywords are never stripped.
pub fn protected_keywords(skip_list: &[String], nouns: &[String]) -> HashSet<String> {
    let noun_set: HashSet<String> = nouns.iter().map(|n| n.to_lowercase()).collect();
    skip_list
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| noun_set.contains(s))
        .collect()
}

/// Normalizes a text for the downstream re-ranking phase.
///
/// If the text contains any configured domain noun it is returned unchanged:
/// the noun anchors the topic, so verbs cannot mislead the reranker. Otherwise
/// every configured predicate verb outside the protected set is stripped:
/// Latin verbs by whole-word match, CJK verbs by substring. Whitespace is
/// collapsed afterwards.
pub fn preprocess_for_rerank(
    text: &str,
    nouns: &[String],
    verbs: &[String],
    protected: &HashSet<String>,
) -> String {
    if verbs.is_empty() || contains_domain_noun(text, nouns) {
        return text.to_string();
    }

    let mut out = text.to_string();
    for verb in verbs {
        if protected.contains(&verb.to_lowercase()) {
            continue;
        }
        if contains_cjk(verb) {
            out = out.replace(verb.as_str(), "");
        } else {
            out = strip_word(&out, verb);
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes whole-word occurrences of `word` from `text`, case-insensitively.
///
/// Word boundaries are any non-alphanumeric characters, so "create" is removed
/// from "create a token" but left alone inside "recreate".
fn strip_word(text: &str, word: &str) -> String {
    let target = word.to_lowercase();
    let mut out = String::with_capacity(text.len());

    for piece in split_keeping_separators(text) {
        match piece {
            Piece::Word(w) => {
                if w.to_lowercase() != target {
                    out.push_str(w);
                }
            }
            Piece::Sep(s) => out.push_str(s),
        }
    }

    out
}

/// A run of word characters or a run of separators.
enum Piece<'a> {
    /// Alphanumeric run.
    Word(&'a str),
    /// Non-alphanumeric run.
    Sep(&'a str),
}

/// Splits text into alternating word and separator runs, losslessly.
fn split_keeping_separators(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_word: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let is_word = c.is_alphanumeric();
        match in_word {
            Some(prev) if prev == is_word => {}
            Some(prev) => {
                let run = &text[start..idx];
                pieces.push(if prev { Piece::Word(run) } else { Piece::Sep(run) });
                start = idx;
                in_word = Some(is_word);
            }
            None => in_word = Some(is_word),
        }
    }

    if start < text.len()
        && let Some(prev) = in_word
    {
        let run = &text[start..];
        pieces.push(if prev { Piece::Word(run) } else { Piece::Sep(run) });
    }

    pieces
}

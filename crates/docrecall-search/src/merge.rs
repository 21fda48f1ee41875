//! Strategy result merging.
//!
//! Strategies overlap: a heading BM25 recalled can also surface from the TOC
//! scan or the content grep. Merging collapses those duplicates into one
//! result set keyed by `(doc_set, page_title)` with headings deduplicated on
//! normalized text. The operation is commutative and associative, so the
//! engine can fold strategy outputs in any order, including from parallel
//! fallback threads, and land on the identical result.

use std::collections::HashMap;

use docrecall_document::normalize_heading_text;

use crate::{Heading, Page};

/// Merges page lists produced by different strategies.
#[derive(Debug, Default)]
pub struct ResultMerger {
    /// Accumulated pages keyed by `(doc_set, page_title)`.
    pages: HashMap<(String, String), Page>,
}

impl ResultMerger {
    /// Creates an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one strategy's pages into the accumulated set.
    ///
    /// Every heading, including the first page seen for a key, goes through
    /// the normalized-text dedup, so duplicates within a single strategy's
    /// output collapse the same way cross-strategy ones do.
    pub fn absorb(&mut self, pages: Vec<Page>) {
        for mut page in pages {
            let key = (page.doc_set.clone(), page.page_title.clone());
            let incoming = std::mem::take(&mut page.headings);
            let target = self.pages.entry(key).or_insert(page);
            merge_headings(target, incoming);
        }
    }

    /// Finishes the merge, returning pages in canonical order.
    ///
    /// Derived fields are refreshed, headings sorted by score descending then
    /// normalized text, pages by score descending then key. The canonical
    /// order makes the output independent of the order strategies ran in.
    pub fn finish(self) -> Vec<Page> {
        let mut pages: Vec<Page> = self.pages.into_values().collect();
        for page in &mut pages {
            page.headings.sort_by(|a, b| {
                b.bm25_sim
                    .total_cmp(&a.bm25_sim)
                    .then_with(|| normalize_heading_text(&a.text).cmp(&normalize_heading_text(&b.text)))
            });
            page.refresh_derived();
        }
        pages.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_set.cmp(&b.doc_set))
                .then_with(|| a.page_title.cmp(&b.page_title))
        });
        pages
    }
}

/// Folds headings into `target`, deduplicating on normalized heading text.
fn merge_headings(target: &mut Page, incoming: Vec<Heading>) {
    for heading in incoming {
        let norm = normalize_heading_text(&heading.text);
        match target
            .headings
            .iter_mut()
            .find(|h| normalize_heading_text(&h.text) == norm)
        {
            Some(kept) => merge_heading(kept, heading),
            None => target.headings.push(heading),
        }
    }
}

/// Whether a heading carries a usable context excerpt. Fully-filtered grep
/// windows leave an empty string behind, which counts as no context.
fn has_context(heading: &Heading) -> bool {
    heading
        .related_context
        .as_deref()
        .is_some_and(|c| !c.is_empty())
}

/// Collapses two copies of the same heading into one.
///
/// The higher BM25 score wins; on a tie the copy carrying non-empty context
/// wins, so a grep hit enriches rather than shadows a recall hit. Whichever
/// copy wins, the survivor inherits the other's context and anchor when it
/// lacks its own.
fn merge_heading(kept: &mut Heading, other: Heading) {
    let other_wins = other.bm25_sim > kept.bm25_sim
        || (other.bm25_sim == kept.bm25_sim && !has_context(kept) && has_context(&other));

    let loser = if other_wins {
        std::mem::replace(kept, other)
    } else {
        other
    };

    if !has_context(kept) && has_context(&loser) {
        kept.related_context = loser.related_context;
    }
    if kept.anchor.is_none() {
        kept.anchor = loser.anchor;
    }
    kept.is_basic = kept.is_basic || loser.is_basic;
    kept.is_precision = kept.is_precision || loser.is_precision;
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use crate::MatchSource;

    use super::*;

    fn heading(text: &str, sim: f64, source: MatchSource, context: Option<&str>) -> Heading {
        Heading {
            level: 2,
            text: text.to_string(),
            full_text: format!("## {text}"),
            anchor: None,
            bm25_sim: sim,
            rerank_sim: None,
            rerank_text: None,
            is_basic: true,
            is_precision: false,
            source,
            related_context: context.map(str::to_string),
        }
    }

    fn page(set: &str, title: &str, headings: Vec<Heading>) -> Page {
        let mut page = Page {
            doc_set: set.to_string(),
            page_title: title.to_string(),
            toc_path: PathBuf::from(format!("{set}/{title}/docTOC.md")),
            score: 0.0,
            is_basic: false,
            is_precision: false,
            heading_count: 0,
            precision_count: 0,
            headings,
        };
        page.refresh_derived();
        page
    }

    fn merge_all(lists: Vec<Vec<Page>>) -> Vec<Page> {
        let mut merger = ResultMerger::new();
        for list in lists {
            merger.absorb(list);
        }
        merger.finish()
    }

    #[test]
    fn distinct_pages_pass_through() {
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("One", 0.5, MatchSource::Recall, None)])],
            vec![page("docs", "B", vec![heading("Two", 0.3, MatchSource::Anchor, None)])],
        ]);

        assert_eq!(merged.len(), 2);
        // Higher-scoring page first
        assert_eq!(merged[0].page_title, "A");
        assert_eq!(merged[1].page_title, "B");
    }

    #[test]
    fn duplicate_heading_higher_score_wins() {
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("Guide", 0.6, MatchSource::Recall, None)])],
            vec![page("docs", "A", vec![heading("guide", 0.0, MatchSource::Anchor, None)])],
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].heading_count, 1);
        let kept = &merged[0].headings[0];
        assert!((kept.bm25_sim - 0.6).abs() < f64::EPSILON);
        assert_eq!(kept.source, MatchSource::Recall);
        // Case difference collapsed by normalization
        assert_eq!(kept.text, "Guide");
    }

    #[test]
    fn winner_inherits_losers_context() {
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("Guide", 0.6, MatchSource::Recall, None)])],
            vec![page(
                "docs",
                "A",
                vec![heading("Guide", 0.0, MatchSource::Grep, Some("excerpt"))],
            )],
        ]);

        let kept = &merged[0].headings[0];
        assert_eq!(kept.source, MatchSource::Recall);
        assert_eq!(kept.related_context.as_deref(), Some("excerpt"));
    }

    #[test]
    fn tie_prefers_context_carrier() {
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("Guide", 0.0, MatchSource::Anchor, None)])],
            vec![page(
                "docs",
                "A",
                vec![heading("Guide", 0.0, MatchSource::Grep, Some("excerpt"))],
            )],
        ]);

        let kept = &merged[0].headings[0];
        assert_eq!(kept.source, MatchSource::Grep);
        assert_eq!(kept.related_context.as_deref(), Some("excerpt"));
    }

    #[test]
    fn duplicates_within_one_page_collapse() {
        // One TOC can hold "## Guide" and "### Guide"; a single strategy then
        // emits both in the same page
        let merged = merge_all(vec![vec![page(
            "docs",
            "A",
            vec![
                heading("Guide", 0.0, MatchSource::Anchor, None),
                heading("guide", 0.0, MatchSource::Anchor, None),
            ],
        )]]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].heading_count, 1);
        assert_eq!(merged[0].headings.len(), 1);
    }

    #[test]
    fn tie_ignores_empty_context() {
        // A fully-filtered grep window leaves an empty excerpt; it must not
        // count as context in the tie rule or shadow a real excerpt
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("Guide", 0.0, MatchSource::Anchor, Some(""))])],
            vec![page(
                "docs",
                "A",
                vec![heading("Guide", 0.0, MatchSource::Grep, Some("excerpt"))],
            )],
        ]);

        let kept = &merged[0].headings[0];
        assert_eq!(kept.source, MatchSource::Grep);
        assert_eq!(kept.related_context.as_deref(), Some("excerpt"));
    }

    #[test]
    fn merge_is_order_independent() {
        let recall = vec![page(
            "docs",
            "A",
            vec![
                heading("Guide", 0.6, MatchSource::Recall, None),
                heading("Steps", 0.3, MatchSource::Recall, None),
            ],
        )];
        let anchor = vec![page("docs", "A", vec![heading("guide", 0.0, MatchSource::Anchor, None)])];
        let grep = vec![page(
            "docs",
            "A",
            vec![heading("Extras", 0.0, MatchSource::Grep, Some("ctx"))],
        )];

        let forward = merge_all(vec![recall.clone(), anchor.clone(), grep.clone()]);
        let backward = merge_all(vec![grep, anchor, recall]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn derived_fields_refreshed_after_merge() {
        let merged = merge_all(vec![
            vec![page("docs", "A", vec![heading("Guide", 0.6, MatchSource::Recall, None)])],
            vec![page("docs", "A", vec![heading("Extras", 0.0, MatchSource::Grep, Some("c"))])],
        ]);

        let page = &merged[0];
        assert_eq!(page.heading_count, 2);
        assert!((page.score - 0.6).abs() < f64::EPSILON);
        // Headings sorted by score descending
        assert_eq!(page.headings[0].text, "Guide");
        assert_eq!(page.headings[1].text, "Extras");
    }
}

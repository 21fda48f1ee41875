//! Content-grep fallback.
//!
//! The last resort when both recall and the TOC scan come up short. Full page
//! content is grepped for domain nouns only; generic query words would match
//! everywhere in prose, so the configured noun vocabulary is the entire match
//! surface. Each hit is attributed to its enclosing heading by scanning
//! backward through the content, and carries an excerpt of the surrounding
//! lines so the caller can judge relevance without opening the page.

use std::collections::HashSet;

use docrecall_config::SearchConfig;
use docrecall_document::{
    DocSetDir, discover_pages, normalize_heading_text, parse_headings, read_page_file,
    strip_inline_links,
};
use regex::{Regex, RegexBuilder, escape};
use tracing::debug;

use crate::{Heading, MatchSource, Page, SearchQuery, SearchStrategy};

/// Domain-noun grep over full page content.
pub struct ContextSearch<'a> {
    /// Engine configuration.
    config: &'a SearchConfig,
}

impl<'a> ContextSearch<'a> {
    /// Creates the strategy.
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    /// Builds the case-insensitive alternation over the domain nouns.
    fn build_pattern(nouns: &[String]) -> Option<Regex> {
        if nouns.is_empty() {
            return None;
        }
        let alternation = nouns
            .iter()
            .map(|n| escape(n))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&format!("({alternation})"))
            .case_insensitive(true)
            .build()
            .ok()
    }

    /// Scans backward from the matched line for its enclosing heading.
    ///
    /// The matched line itself counts when it is a heading. Returns `None`
    /// when no heading appears within the scan window; such matches are
    /// discarded rather than attributed to the wrong section.
    fn find_enclosing_heading(&self, lines: &[&str], matched: usize) -> Option<usize> {
        let floor = matched.saturating_sub(self.config.heading_scan_window);
        (floor..=matched)
            .rev()
            .find(|&idx| !parse_headings(lines[idx]).is_empty())
    }

    /// Extracts the context excerpt around a matched line.
    ///
    /// The window starts at `context_window_lines` either side of the match
    /// and grows one line per side while the raw word count stays below
    /// `min_context_words`, up to `max_context_expansions` steps. Only once
    /// the window is fixed are inline links resolved and URL-only and blank
    /// lines dropped, so noise lines still count toward expansion.
    fn extract_context(&self, lines: &[&str], matched: usize) -> String {
        let mut radius = self.config.context_window_lines;
        let mut expansions = 0;
        while window_word_count(lines, matched, radius) < self.config.min_context_words
            && expansions < self.config.max_context_expansions
        {
            radius += 1;
            expansions += 1;
        }

        let (start, end) = window_bounds(lines.len(), matched, radius);
        lines[start..=end]
            .iter()
            .map(|line| strip_inline_links(line))
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !is_url_line(trimmed)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SearchStrategy for ContextSearch<'_> {
    fn name(&self) -> &'static str {
        "context"
    }

    fn search(&self, query: &SearchQuery, doc_sets: &[DocSetDir]) -> Vec<Page> {
        let nouns = query.effective_domain_nouns(self.config);
        let Some(pattern) = Self::build_pattern(nouns) else {
            // No nouns configured: grepping prose would be pure noise
            return Vec::new();
        };
        debug!(nouns = nouns.len(), "content grep starting");

        let mut pages: Vec<Page> = Vec::new();
        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        let mut total = 0usize;

        'sets: for set in doc_sets {
            for files in discover_pages(set) {
                let Some(content) = read_page_file(&files.content_path) else {
                    continue;
                };
                let lines: Vec<&str> = content.lines().collect();

                let mut headings = Vec::new();
                for (idx, line) in lines.iter().enumerate() {
                    if !pattern.is_match(line) {
                        continue;
                    }
                    let Some(heading_idx) = self.find_enclosing_heading(&lines, idx) else {
                        continue;
                    };
                    let Some(parsed) = parse_headings(lines[heading_idx]).into_iter().next()
                    else {
                        continue;
                    };

                    let key = (
                        files.doc_set.clone(),
                        files.page_title.clone(),
                        normalize_heading_text(&parsed.text),
                    );
                    if !seen.insert(key) {
                        continue;
                    }

                    let context = self.extract_context(&lines, idx);
                    headings.push(Heading {
                        level: parsed.level,
                        text: parsed.text,
                        full_text: parsed.full_text,
                        anchor: parsed.anchor,
                        bm25_sim: 0.0,
                        rerank_sim: None,
                        rerank_text: None,
                        is_basic: true,
                        is_precision: false,
                        source: MatchSource::Grep,
                        related_context: Some(context),
                    });
                    total += 1;
                    if total >= self.config.max_grep_results {
                        break;
                    }
                }

                if !headings.is_empty() {
                    let mut page = Page {
                        doc_set: files.doc_set,
                        page_title: files.page_title,
                        toc_path: files.toc_path,
                        score: 0.0,
                        is_basic: true,
                        is_precision: false,
                        heading_count: 0,
                        precision_count: 0,
                        headings,
                    };
                    page.refresh_derived();
                    pages.push(page);
                }
                if total >= self.config.max_grep_results {
                    debug!(cap = self.config.max_grep_results, "grep result cap hit");
                    break 'sets;
                }
            }
        }

        pages
    }
}

/// Counts whitespace-separated words in the window around `matched`.
fn window_word_count(lines: &[&str], matched: usize, radius: usize) -> usize {
    let (start, end) = window_bounds(lines.len(), matched, radius);
    lines[start..=end]
        .iter()
        .map(|line| line.split_whitespace().count())
        .sum()
}

/// Clamps a symmetric window around `matched` to the line range.
fn window_bounds(len: usize, matched: usize, radius: usize) -> (usize, usize) {
    let start = matched.saturating_sub(radius);
    let end = (matched + radius).min(len.saturating_sub(1));
    (start, end)
}

/// A line that is nothing but a bare URL.
fn is_url_line(trimmed: &str) -> bool {
    (trimmed.starts_with("https://") || trimmed.starts_with("http://"))
        && !trimmed.contains(char::is_whitespace)
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::Path;

    use docrecall_document::{CONTENT_FILENAME, TOC_FILENAME};
    use tempfile::TempDir;

    use super::*;

    fn make_page(base: &Path, set: &str, page: &str, content: &str) {
        let dir = base.join(set).join(page);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TOC_FILENAME), "# placeholder\n").unwrap();
        fs::write(dir.join(CONTENT_FILENAME), content).unwrap();
    }

    fn doc_set(base: &Path, name: &str) -> DocSetDir {
        DocSetDir {
            name: name.to_string(),
            path: base.join(name),
        }
    }

    fn run(config: &SearchConfig, base: &Path, queries: &[&str], nouns: &[&str]) -> Vec<Page> {
        let strategy = ContextSearch::new(config);
        let mut query = SearchQuery::new(queries.iter().map(|q| q.to_string()).collect());
        query.domain_nouns = nouns.iter().map(|n| n.to_string()).collect();
        strategy.search(&query, &[doc_set(base, "docs")])
    }

    #[test]
    fn match_attributed_to_enclosing_heading() {
        let base = TempDir::new().unwrap();
        make_page(
            base.path(),
            "docs",
            "Approvals",
            "## Creating Flows\nTo build an approval you submit a form.\n\n## Other\nNothing here.\n",
        );

        let config = SearchConfig::new(base.path());
        let pages = run(&config, base.path(), &["how do approvals work"], &["approval"]);

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.heading_count, 1);
        let heading = &page.headings[0];
        assert_eq!(heading.text, "Creating Flows");
        assert_eq!(heading.source, MatchSource::Grep);
        assert!(heading.is_basic);
        assert!((heading.bm25_sim - 0.0).abs() < f64::EPSILON);
        assert!(
            heading
                .related_context
                .as_deref()
                .unwrap()
                .contains("submit a form")
        );
    }

    #[test]
    fn no_nouns_means_no_scan() {
        let base = TempDir::new().unwrap();
        make_page(base.path(), "docs", "Approvals", "## H\napproval text\n");

        let config = SearchConfig::new(base.path());
        assert!(run(&config, base.path(), &["approval"], &[]).is_empty());
    }

    #[test]
    fn match_without_heading_in_window_discarded() {
        let base = TempDir::new().unwrap();
        // Heading sits further back than the scan window allows
        let mut content = String::from("## Far Away\n");
        for _ in 0..10 {
            content.push_str("filler line\n");
        }
        content.push_str("approval mention here\n");
        make_page(base.path(), "docs", "Approvals", &content);

        let mut config = SearchConfig::new(base.path());
        config.heading_scan_window = 3;
        assert!(run(&config, base.path(), &["q"], &["approval"]).is_empty());
    }

    #[test]
    fn duplicate_heading_reported_once() {
        let base = TempDir::new().unwrap();
        make_page(
            base.path(),
            "docs",
            "Approvals",
            "## Flows\napproval one\napproval two\napproval three\n",
        );

        let config = SearchConfig::new(base.path());
        let pages = run(&config, base.path(), &["q"], &["approval"]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].heading_count, 1);
    }

    #[test]
    fn global_cap_limits_results() {
        let base = TempDir::new().unwrap();
        for i in 0..5 {
            let content =
                format!("## Section A{i}\napproval here\n## Section B{i}\napproval again\n");
            make_page(base.path(), "docs", &format!("Page{i}"), &content);
        }

        let mut config = SearchConfig::new(base.path());
        config.max_grep_results = 3;
        let pages = run(&config, base.path(), &["q"], &["approval"]);

        let total: usize = pages.iter().map(|p| p.heading_count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn window_expands_until_enough_words() {
        let base = TempDir::new().unwrap();
        // Sparse lines around the match force expansion to pull in more
        let content = "## H\nearly extra words beyond the base window\n\n\n\n\n\napproval\n\n\n\n\n\nlate extra words beyond the base window\n";
        make_page(base.path(), "docs", "Approvals", content);

        let mut config = SearchConfig::new(base.path());
        config.context_window_lines = 2;
        config.min_context_words = 10;
        config.max_context_expansions = 5;
        let pages = run(&config, base.path(), &["q"], &["approval"]);

        let context = pages[0].headings[0].related_context.as_deref().unwrap();
        assert!(context.contains("early extra words"));
        assert!(context.contains("late extra words"));
    }

    #[test]
    fn url_and_blank_lines_dropped_from_context() {
        let base = TempDir::new().unwrap();
        let content = "## H\nhttps://example.com/page\n\napproval mention with [link](https://x.com) inline\n";
        make_page(base.path(), "docs", "Approvals", content);

        let config = SearchConfig::new(base.path());
        let pages = run(&config, base.path(), &["q"], &["approval"]);

        let context = pages[0].headings[0].related_context.as_deref().unwrap();
        assert!(!context.contains("https://example.com"));
        assert!(context.contains("link"));
        assert!(!context.contains("(https://x.com)"));
        assert!(!context.contains("\n\n"));
    }

    #[test]
    fn missing_content_file_skipped() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("docs").join("TocOnly");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TOC_FILENAME), "# T\n").unwrap();

        let config = SearchConfig::new(base.path());
        assert!(run(&config, base.path(), &["q"], &["approval"]).is_empty());
    }
}

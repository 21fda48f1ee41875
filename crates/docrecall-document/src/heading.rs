//! Markdown heading parsing for TOC files.
//!
//! TOC files produced by the documentation scraper list one heading per line.
//! Heading lines follow `^#{1,6}\s+.+$`, but carry two kinds of URL noise:
//! a trailing anchor-link suffix (`：https://...` or `: https://...`) appended
//! by the scraper, and inline markdown links `[text](url)`. Parsing strips
//! both, keeps the link URL as the heading's anchor, and preserves the `#`
//! count as the heading level.

/// A heading parsed from a TOC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeading {
    /// Heading level, 1-6 (the number of `#` markers).
    pub level: u8,
    /// Cleaned heading text without `#` markers or URLs.
    pub text: String,
    /// Cleaned heading line with `#` markers preserved.
    pub full_text: String,
    /// URL of the first inline link in the heading, if any.
    pub anchor: Option<String>,
}

/// Parses all heading lines from TOC text.
///
/// Non-heading lines and headings that clean down to nothing are skipped.
pub fn parse_headings(toc: &str) -> Vec<ParsedHeading> {
    toc.lines().filter_map(parse_heading_line).collect()
}

/// Parses a single TOC line as a heading, if it is one.
fn parse_heading_line(line: &str) -> Option<ParsedHeading> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &trimmed[level..];
    // `#` markers must be followed by whitespace and non-empty text
    if !rest.starts_with(char::is_whitespace) || rest.trim().is_empty() {
        return None;
    }

    let anchor = first_link_url(rest);
    let text = clean_heading_text(rest);
    if text.is_empty() {
        return None;
    }

    let hashes = "#".repeat(level);
    Some(ParsedHeading {
        level: level as u8,
        full_text: format!("{hashes} {text}"),
        text,
        anchor,
    })
}

/// Strips URL noise from a heading line.
///
/// Removes the trailing `：https://...` / `: https://...` anchor suffix,
/// resolves inline `[text](url)` links to their text, and strips the leading
/// `#` markers. With `preserve_hash` the markers are kept, so
/// `"## [Setup Guide](https://x.com)：https://x.com"` becomes
/// `"## Setup Guide"`; without, just `"Setup Guide"`.
pub fn remove_url_from_heading(line: &str, preserve_hash: bool) -> String {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    let rest = &trimmed[level..];

    let text = clean_heading_text(rest);
    if preserve_hash && level > 0 {
        let hashes = "#".repeat(level);
        if text.is_empty() {
            return hashes;
        }
        return format!("{hashes} {text}");
    }
    text
}

/// Normalizes heading text for deduplication across strategies:
/// `#` markers stripped, surrounding whitespace removed, case folded.
pub fn normalize_heading_text(text: &str) -> String {
    text.trim_start_matches('#').trim().to_lowercase()
}

/// Anchor-suffix markers appended by the scraper after heading text.
const ANCHOR_SUFFIXES: &[&str] = &["：https://", "：http://", ": https://", ": http://"];

/// Removes suffix noise and resolves links in the text after the `#` markers.
fn clean_heading_text(rest: &str) -> String {
    let mut text = rest.trim();

    // Cut at the earliest trailing anchor-link suffix
    if let Some(cut) = ANCHOR_SUFFIXES
        .iter()
        .filter_map(|pat| text.find(pat))
        .min()
    {
        text = text[..cut].trim_end();
    }

    strip_inline_links(text).trim().to_string()
}

/// Replaces every `[text](url)` markdown link with its text.
pub fn strip_inline_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut remaining = text;

    while let Some((before, label, _, after)) = split_link(remaining) {
        out.push_str(before);
        out.push_str(label);
        remaining = after;
    }
    out.push_str(remaining);

    out
}

/// Finds the first complete `[label](url)` in the text.
///
/// Returns the text before the link, the label, the URL, and the text after
/// the closing paren. A `[` with no matching `](url)` is plain text; the scan
/// skips past it so a complete link later on the line still resolves. Returns
/// `None` when no complete link remains.
fn split_link(text: &str) -> Option<(&str, &str, &str, &str)> {
    let mut from = 0;
    while let Some(rel) = text[from..].find('[') {
        let open = from + rel;
        let close = text[open..].find(']')? + open;
        let paren_open = close + 1;
        if text[paren_open..].starts_with('(') {
            if let Some(paren_close) = text[paren_open..].find(')').map(|i| i + paren_open) {
                return Some((
                    &text[..open],
                    &text[open + 1..close],
                    &text[paren_open + 1..paren_close],
                    &text[paren_close + 1..],
                ));
            }
        }
        from = open + 1;
    }
    None
}

/// Extracts the URL of the first inline markdown link, if any.
fn first_link_url(text: &str) -> Option<String> {
    let mut remaining = text;
    while let Some((_, _, url, after)) = split_link(remaining) {
        let url = url.trim();
        if !url.is_empty() {
            return Some(url.to_string());
        }
        remaining = after;
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_plain_headings() {
        let toc = "# Title\n## Install Guide\n### Steps\n";
        let headings = parse_headings(toc);

        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].text, "Title");
        assert_eq!(headings[1].level, 2);
        assert_eq!(headings[1].text, "Install Guide");
        assert_eq!(headings[1].full_text, "## Install Guide");
        assert_eq!(headings[2].level, 3);
    }

    #[test]
    fn skips_non_heading_lines() {
        let toc = "# Title\n\nplain text\n####### seven hashes\n#nospace\n";
        let headings = parse_headings(toc);
        assert_eq!(headings.len(), 1);
    }

    #[test]
    fn strips_fullwidth_colon_suffix() {
        let heading = parse_heading_line("## 创建审批流：https://example.com/a/b").unwrap();
        assert_eq!(heading.text, "创建审批流");
        assert_eq!(heading.full_text, "## 创建审批流");
    }

    #[test]
    fn strips_ascii_colon_suffix() {
        let heading = parse_heading_line("## Setup: https://example.com/setup").unwrap();
        assert_eq!(heading.text, "Setup");
    }

    #[test]
    fn resolves_inline_links_and_keeps_anchor() {
        let heading = parse_heading_line("## [Setup Guide](https://x.com/setup)").unwrap();
        assert_eq!(heading.text, "Setup Guide");
        assert_eq!(heading.anchor.as_deref(), Some("https://x.com/setup"));
    }

    #[test]
    fn remove_url_combined_noise() {
        let cleaned =
            remove_url_from_heading("## [Setup Guide](https://x.com)：https://x.com", false);
        assert_eq!(cleaned, "Setup Guide");

        let with_hash =
            remove_url_from_heading("## [Setup Guide](https://x.com)：https://x.com", true);
        assert_eq!(with_hash, "## Setup Guide");
    }

    #[test]
    fn remove_url_no_noise_is_identity() {
        assert_eq!(remove_url_from_heading("## Plain Heading", false), "Plain Heading");
        assert_eq!(remove_url_from_heading("## Plain Heading", true), "## Plain Heading");
    }

    #[test]
    fn multiple_links_all_resolved() {
        let heading = parse_heading_line("## [A](https://a.com) and [B](https://b.com)").unwrap();
        assert_eq!(heading.text, "A and B");
        // First link wins the anchor
        assert_eq!(heading.anchor.as_deref(), Some("https://a.com"));
    }

    #[test]
    fn stray_bracket_does_not_block_later_links() {
        let heading = parse_heading_line("## see [1] and [Guide](https://g.com)").unwrap();
        assert_eq!(heading.text, "see [1] and Guide");
        assert_eq!(heading.anchor.as_deref(), Some("https://g.com"));

        assert_eq!(strip_inline_links("[x] then [A](https://a.com)"), "[x] then A");
    }

    #[test]
    fn heading_that_cleans_to_nothing_is_skipped() {
        assert!(parse_heading_line("## : https://only-a-link.com").is_none());
    }

    #[test]
    fn normalize_for_dedup() {
        assert_eq!(normalize_heading_text("## Install Guide "), "install guide");
        assert_eq!(normalize_heading_text("INSTALL GUIDE"), "install guide");
        assert_eq!(
            normalize_heading_text("  install guide"),
            normalize_heading_text("### Install Guide")
        );
    }
}

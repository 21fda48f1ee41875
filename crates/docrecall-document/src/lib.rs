//! Knowledge-base layout for docrecall.
//!
//! A knowledge base is a directory of doc-sets, each a named tree of pages:
//!
//! ```text
//! <base_dir>/<doc_set>/<page_title>/docTOC.md      heading list (lightweight)
//! <base_dir>/<doc_set>/<page_title>/docContent.md  full page text
//! ```
//!
//! This crate discovers that layout and parses TOC heading lines. Files on
//! disk are read-only inputs; an unreadable file is reported as absent
//! content so a partially corrupt knowledge base degrades recall for the
//! affected page instead of failing the whole search.

#![warn(missing_docs)]

mod discovery;
mod heading;

use std::{fs, path::Path};

pub use discovery::{DocSetDir, PageFiles, discover_doc_sets, discover_pages};
pub use heading::{
    ParsedHeading, normalize_heading_text, parse_headings, remove_url_from_heading,
    strip_inline_links,
};

/// Filename of a page's table-of-contents file.
pub const TOC_FILENAME: &str = "docTOC.md";

/// Filename of a page's full content file.
pub const CONTENT_FILENAME: &str = "docContent.md";

/// Reads a knowledge-base file, treating any failure as absent content.
///
/// Missing files, permission errors, and invalid UTF-8 all return `None`;
/// callers decide whether the condition is worth logging.
pub fn read_page_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

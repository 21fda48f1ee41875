//! Doc-set and page discovery.
//!
//! Walks the knowledge-base directory to enumerate doc-sets (immediate
//! subdirectories) and their pages (directories containing a `docTOC.md`).
//! Results are sorted by path so enumeration order, and therefore BM25
//! tie-breaking, is deterministic across runs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{CONTENT_FILENAME, TOC_FILENAME};

/// A discovered doc-set directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSetDir {
    /// Doc-set name (the directory name).
    pub name: String,
    /// Absolute path to the doc-set root.
    pub path: PathBuf,
}

/// The files belonging to one discovered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFiles {
    /// Doc-set the page belongs to.
    pub doc_set: String,
    /// Page title (the page directory name).
    pub page_title: String,
    /// Path to the page's TOC file.
    pub toc_path: PathBuf,
    /// Path to the page's full content file.
    pub content_path: PathBuf,
}

/// Returns true for dotfile names, which are never doc-sets or pages.
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Discovers doc-sets under the knowledge-base root.
///
/// Doc-sets are the immediate subdirectories of `base_dir`, sorted by name.
/// Hidden directories are skipped. An unreadable base directory yields an
/// empty list; validation reports missing directories before search runs.
pub fn discover_doc_sets(base_dir: &Path) -> Vec<DocSetDir> {
    let Ok(entries) = std::fs::read_dir(base_dir) else {
        return Vec::new();
    };

    let mut sets: Vec<DocSetDir> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter_map(|e| {
            let name = e.file_name().to_str()?.to_string();
            if is_hidden(&name) {
                return None;
            }
            Some(DocSetDir {
                name,
                path: e.path(),
            })
        })
        .collect();

    sets.sort_by(|a, b| a.name.cmp(&b.name));
    sets
}

/// Discovers the pages of a doc-set.
///
/// A page is any directory under the doc-set root containing a `docTOC.md`.
/// The page title is that directory's name. Pages are sorted by TOC path for
/// a stable enumeration order. Symlinks are not followed.
pub fn discover_pages(doc_set: &DocSetDir) -> Vec<PageFiles> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(&doc_set.path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.file_name()
                .to_str()
                .is_none_or(|name| !is_hidden(name))
        })
    {
        let Ok(entry) = entry else { continue };

        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(TOC_FILENAME) {
            continue;
        }

        let toc_path = entry.path().to_path_buf();
        let Some(page_dir) = toc_path.parent() else {
            continue;
        };
        let Some(page_title) = page_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        pages.push(PageFiles {
            doc_set: doc_set.name.clone(),
            page_title: page_title.to_string(),
            toc_path: toc_path.clone(),
            content_path: page_dir.join(CONTENT_FILENAME),
        });
    }

    pages.sort_by(|a, b| a.toc_path.cmp(&b.toc_path));
    pages
}

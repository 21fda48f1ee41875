//! Keyword selection for the TOC fallback scanner.
//!
//! The anchor fallback strategy turns free-text queries into a keyword
//! alternation and greps table-of-contents files with it. Query tokens are
//! admitted as keywords when they are CJK (always precise enough), recognized
//! technical terms (short abbreviations that English stopword lists would
//! otherwise swallow), or simply not stopwords.

use crate::{Stopwords, contains_cjk};

/// Short technical abbreviations worth keeping even when a stopword list or a
/// minimum-length filter would reject them.
static TECHNICAL_TERMS: &[&str] = &[
    "api", "sdk", "cli", "ui", "ux", "id", "ip", "url", "uri", "css", "js", "ts", "sql", "sso",
    "jwt", "oauth", "http", "https", "json", "xml", "yaml", "toml", "csv", "pdf", "app", "web",
    "ai", "llm", "vm", "os", "db", "gpu", "cpu", "sms", "mfa", "otp", "cdn", "dns", "tls", "ssl",
    "ssh", "ftp", "git", "npm", "pip", "ide", "rpc", "crm", "erp", "saas", "iot",
];

/// Returns true if the token is a recognized technical term.
///
/// Case-insensitive for ASCII.
pub fn is_technical_term(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    TECHNICAL_TERMS.contains(&lower.as_str())
}

/// Decides whether a query token should become a scan keyword.
///
/// CJK tokens are kept as-is. Latin tokens are kept if they are technical
/// terms or not stopwords.
pub fn is_search_keyword(token: &str, stopwords: &Stopwords) -> bool {
    if token.is_empty() {
        return false;
    }
    if contains_cjk(token) {
        return true;
    }
    is_technical_term(token) || !stopwords.contains(token)
}

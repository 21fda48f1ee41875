//! Minimal suffix-stripping stemmer for domain-noun matching.
//!
//! This is intentionally much weaker than Porter stemming: domain nouns are
//! short, configured by hand, and only need plural/participle folding so that
//! "workflows" matches the noun "workflow" and "copied" matches "copy".

/// Stems a Latin word by stripping common English suffixes.
///
/// Handled suffixes, checked in order: `-ies` → `y`, `-ves` → `f`,
/// `-ied` → `y`, `-es` → ``, `-s` → `` (but never `-ss`). The input is
/// lowercased first. Words too short to carry a suffix pass through unchanged.
pub fn stem(word: &str) -> String {
    let lower = word.to_lowercase();
    let n = lower.len();

    if n > 4 {
        if let Some(base) = lower.strip_suffix("ies") {
            return format!("{base}y");
        }
        if let Some(base) = lower.strip_suffix("ves") {
            return format!("{base}f");
        }
        if let Some(base) = lower.strip_suffix("ied") {
            return format!("{base}y");
        }
    }
    if n > 3
        && let Some(base) = lower.strip_suffix("es")
    {
        return base.to_string();
    }
    if n > 2 && !lower.ends_with("ss")
        && let Some(base) = lower.strip_suffix('s')
    {
        return base.to_string();
    }

    lower
}

//! CJK-ratio language detection.
//!
//! Headings and queries in the knowledge bases mix Chinese and English. The
//! detector computes the ratio of CJK characters to all non-whitespace
//! characters and compares it against a threshold: at or above the threshold
//! the text is treated as Chinese, otherwise as English. Call sites choose
//! their own threshold since heading text and free-form queries have different
//! noise profiles.

/// Default CJK ratio at or above which text is classified as Chinese.
pub const DEFAULT_LANG_THRESHOLD: f64 = 0.6;

/// Detected language of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// Predominantly CJK text.
    Zh,
    /// Everything else.
    En,
}

/// Returns true if the character is a CJK ideograph.
///
/// Covers the CJK Unified Ideographs block, Extension A, the compatibility
/// block, and Extension B. Punctuation and fullwidth forms are not counted;
/// only ideographs decide the language.
pub fn is_cjk_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF
    )
}

/// Returns true if the text contains at least one CJK character.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Computes the ratio of CJK characters to non-whitespace characters.
///
/// Returns 0.0 for empty or whitespace-only text.
pub fn cjk_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut cjk = 0usize;

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        total += 1;
        if is_cjk_char(c) {
            cjk += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    cjk as f64 / total as f64
}

/// Detects the language of a text by CJK character ratio.
///
/// A ratio greater than or equal to `threshold` classifies the text as
/// [`Lang::Zh`]; anything below is [`Lang::En`]. Empty text is English.
pub fn detect_language(text: &str, threshold: f64) -> Lang {
    if cjk_ratio(text) >= threshold {
        Lang::Zh
    } else {
        Lang::En
    }
}

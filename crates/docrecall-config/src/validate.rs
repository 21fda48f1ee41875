//! Configuration validation.
//!
//! Every parameter is range-checked before a search is allowed to run.
//! Violations are reported as structured errors and never clamped.

use crate::{ConfigError, SearchConfig};

/// Range check for a float parameter.
fn check_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::ParamOutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validates a full search configuration.
pub(crate) fn validate(config: &SearchConfig) -> Result<(), ConfigError> {
    check_range("bm25_k1", config.bm25.k1, 0.0, 5.0)?;
    check_range("bm25_b", config.bm25.b, 0.0, 1.0)?;
    check_range("threshold_page_title", config.threshold_page_title, 0.0, 1.0)?;
    check_range("threshold_headings", config.threshold_headings, 0.0, 1.0)?;
    check_range("threshold_precision", config.threshold_precision, 0.0, 1.0)?;
    check_range("rerank_threshold", config.rerank.threshold, 0.0, 1.0)?;
    check_range("rerank_lang_threshold", config.rerank.lang_threshold, 0.0, 1.0)?;

    if config.min_page_titles < 1 {
        return Err(ConfigError::CountBelowOne {
            name: "min_page_titles",
        });
    }
    if config.min_headings < 1 {
        return Err(ConfigError::CountBelowOne {
            name: "min_headings",
        });
    }
    if config.min_token_length < 1 {
        return Err(ConfigError::CountBelowOne {
            name: "min_token_length",
        });
    }
    if config.min_token_length > config.max_token_length {
        return Err(ConfigError::TokenLengthInverted {
            min: config.min_token_length,
            max: config.max_token_length,
        });
    }

    if !config.base_dir.exists() {
        return Err(ConfigError::BaseDirNotFound {
            path: config.base_dir.clone(),
        });
    }
    if !config.base_dir.is_dir() {
        return Err(ConfigError::BaseDirNotDirectory {
            path: config.base_dir.clone(),
        });
    }

    Ok(())
}

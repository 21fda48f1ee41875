//! Error types for docrecall configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or validating configuration.
///
/// All of these are detected before any search executes; they are never
/// clamped or silently corrected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A numeric parameter is outside its valid range.
    #[error("{name} = {value} is out of range [{min}, {max}]")]
    ParamOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Lowest accepted value.
        min: f64,
        /// Highest accepted value.
        max: f64,
    },

    /// A count parameter that must be at least one is zero.
    #[error("{name} must be at least 1")]
    CountBelowOne {
        /// Parameter name.
        name: &'static str,
    },

    /// Token length bounds are inverted.
    #[error("min_token_length ({min}) exceeds max_token_length ({max})")]
    TokenLengthInverted {
        /// Configured minimum token length.
        min: usize,
        /// Configured maximum token length.
        max: usize,
    },

    /// The knowledge-base directory does not exist.
    #[error("base directory does not exist: {path}")]
    BaseDirNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The knowledge-base path is not a directory.
    #[error("base path is not a directory: {path}")]
    BaseDirNotDirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },
}

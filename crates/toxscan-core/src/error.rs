//! Error types for toxscan-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A bounded collection refused an insert because it is full.
///
/// Non-fatal: callers stop feeding the collection and record the cutoff.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{collection} capacity of {limit} reached")]
pub struct CapacityExceeded {
    /// Which collection filled up.
    pub collection: &'static str,
    /// The configured bound.
    pub limit: usize,
}

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No token survived tokenization and filtering.
    #[error("no content to analyze in {source_id}: every token was a stopword or too short")]
    EmptyContent {
        /// Identifier of the analyzed source.
        source_id: String,
    },

    /// A working buffer could not be allocated.
    #[error("could not allocate {what} for {requested} entries")]
    Allocation {
        /// The buffer that failed.
        what: &'static str,
        /// How many entries were requested.
        requested: usize,
    },

    /// The input file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file is larger than the configured limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// File that was refused.
        path: Utf8PathBuf,
        /// Its size in bytes.
        size: u64,
        /// The configured limit.
        limit: usize,
    },

    /// No valid CSV column was selected.
    #[error("no valid columns selected (file has {available} columns)")]
    NoColumns {
        /// Number of columns in the header row.
        available: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisOutcome<T> = Result<T, AnalysisError>;

/// Errors that can occur while loading or editing dictionaries.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// A dictionary file or directory could not be read or written.
    #[error("dictionary I/O failed for {path}")]
    Io {
        /// File or directory that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A term to insert was empty after trimming.
    #[error("toxic term cannot be empty")]
    EmptyTerm,

    /// The file-name glob could not be compiled.
    #[error("invalid dictionary file pattern: {0}")]
    Pattern(#[from] globset::Error),
}

/// Result type alias using [`DictionaryError`].
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Errors from comparing two analysis slots.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompareError {
    /// One or both slots hold no analysis.
    #[error("comparison requires two analyses (A loaded: {a_loaded}, B loaded: {b_loaded})")]
    NotLoaded {
        /// Whether slot A holds a result.
        a_loaded: bool,
        /// Whether slot B holds a result.
        b_loaded: bool,
    },
}

//! Core library for toxscan.
//!
//! This crate provides the text pipeline used by the `toxscan` CLI and any
//! downstream consumers: normalization, tokenization, toxic term matching,
//! deduplication, metrics, sorting, comparison and report data.
//!
//! # Modules
//!
//! - [`normalize`] - Case folding and character stripping
//! - [`tokenizer`] - Line splitting and token filtering
//! - [`csv`] - CSV field splitting and column selection
//! - [`dictionary`] - Stopword and toxic term dictionaries
//! - [`matcher`] - Greedy phrase and word matching
//! - [`unique`] - Order-preserving deduplication
//! - [`metrics`] - Linguistic metrics
//! - [`sort`] - Bubble, quick and merge sort
//! - [`analysis`] - The end-to-end pipeline
//! - [`compare`] - A/B comparison
//! - [`report`] - Severity breakdown and chart data
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use toxscan_core::{AnalysisOptions, Analyzer, ConfigLoader, StopwordSet, ToxicDictionary};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let stopwords = StopwordSet::load(&config.stopwords_file, config.limits.max_stopwords)
//!     .expect("Failed to load stopwords");
//! let dictionary = ToxicDictionary::load_sources(
//!     &config.dictionary_dir,
//!     &config.dictionary_fallback,
//!     &config.limits,
//! )
//! .expect("Failed to load dictionary");
//!
//! let analyzer = Analyzer::new(stopwords, dictionary, AnalysisOptions::from_config(&config));
//! let analysis = analyzer.analyze_text("inline", "You absolute idiot.").expect("analysis failed");
//! println!("Toxic ratio: {:.2}%", analysis.result.toxic_ratio);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod compare;
pub mod config;
pub mod csv;
pub mod dictionary;
pub mod error;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod report;
pub mod sort;
pub mod tokenizer;
pub mod unique;

pub use analysis::{Analysis, AnalysisOptions, AnalysisResult, Analyzer, CapacityReport};
pub use compare::{ComparisonReport, ComparisonSlots, Slot};
pub use config::{Config, ConfigLoader, ConfigSources, Limits, LogLevel};
pub use dictionary::{Language, Severity, StopwordSet, ToxicDictionary, ToxicTerm};
pub use error::{
    AnalysisError, AnalysisOutcome, CapacityExceeded, CompareError, ConfigError, ConfigResult,
    DictionaryError, DictionaryResult,
};
pub use sort::{SortAlgorithm, WordFrequency};

/// Default maximum input size: 64 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

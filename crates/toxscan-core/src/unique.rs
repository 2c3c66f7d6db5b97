//! Order-preserving deduplication of a token buffer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How to deduplicate a token buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Deduplicate everything, keeping at most `limit` unique tokens.
    Exact {
        /// Upper bound on unique tokens.
        limit: usize,
    },
    /// Stop scanning once `cap` unique tokens have been collected.
    Bounded {
        /// Number of unique tokens after which scanning stops.
        cap: usize,
    },
}

impl DedupStrategy {
    /// Pick `Bounded` for corpora of at least `threshold` tokens, `Exact`
    /// otherwise.
    pub const fn for_corpus(len: usize, threshold: usize, cap: usize, limit: usize) -> Self {
        if len >= threshold {
            Self::Bounded { cap }
        } else {
            Self::Exact { limit }
        }
    }

    const fn bound(self) -> usize {
        match self {
            Self::Exact { limit } => limit,
            Self::Bounded { cap } => cap,
        }
    }
}

/// Which unique count feeds lexical diversity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UniqueCountMode {
    /// Use the size of the unique set, which a bounded strategy may cap.
    #[default]
    Capped,
    /// Count distinct tokens across the whole buffer regardless of caps.
    Exact,
}

/// Unique tokens in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueSet {
    /// The tokens, no duplicates.
    pub words: Vec<String>,
    /// True when the strategy's bound stopped collection early.
    pub truncated: bool,
}

impl UniqueSet {
    /// Number of unique tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the set holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Collect unique tokens in order of first appearance.
#[tracing::instrument(skip(tokens), fields(tokens = tokens.len()))]
pub fn build_unique(tokens: &[String], strategy: DedupStrategy) -> UniqueSet {
    let bound = strategy.bound();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut words = Vec::new();
    let mut truncated = false;

    for token in tokens {
        if seen.contains(token.as_str()) {
            continue;
        }
        if words.len() >= bound {
            truncated = true;
            break;
        }
        seen.insert(token.as_str());
        words.push(token.clone());
    }

    if truncated {
        tracing::debug!(bound, "unique set stopped at its bound");
    }
    UniqueSet { words, truncated }
}

/// Number of distinct tokens in the whole buffer.
pub fn count_distinct(tokens: &[String]) -> usize {
    tokens.iter().map(String::as_str).collect::<HashSet<_>>().len()
}

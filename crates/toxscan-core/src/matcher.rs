//! Greedy toxic term matching over a token buffer.
//!
//! At each position a bigram is tried first, then a trigram, then the
//! single token. The first hit consumes its tokens; nothing is matched
//! twice.

use std::collections::HashMap;

use crate::dictionary::ToxicDictionary;
use crate::normalize;

/// Per-term hit counts from one pass, parallel to the dictionary's
/// word and phrase lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Hits per single-word term, indexed like [`ToxicDictionary::words`].
    pub word_counts: Vec<usize>,
    /// Hits per phrase, indexed like [`ToxicDictionary::phrases`].
    pub phrase_counts: Vec<usize>,
    /// Total toxic occurrences: word hits plus phrase hits.
    pub total: usize,
}

/// Lookup tables built once per dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryMatcher {
    words: HashMap<String, usize>,
    phrases: HashMap<String, usize>,
    word_count: usize,
    phrase_count: usize,
}

impl DictionaryMatcher {
    /// Index a dictionary. When two entries share a key the first wins.
    pub fn new(dictionary: &ToxicDictionary) -> Self {
        let mut words = HashMap::with_capacity(dictionary.words().len());
        for (i, term) in dictionary.words().iter().enumerate() {
            words.entry(term.term.to_ascii_lowercase()).or_insert(i);
        }
        let mut phrases = HashMap::with_capacity(dictionary.phrases().len());
        for (i, term) in dictionary.phrases().iter().enumerate() {
            phrases.entry(normalize::normalize(&term.term)).or_insert(i);
        }
        Self {
            words,
            phrases,
            word_count: dictionary.words().len(),
            phrase_count: dictionary.phrases().len(),
        }
    }

    /// Count toxic words and phrases in `tokens`.
    #[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> Classification {
        let mut out = Classification {
            word_counts: vec![0; self.word_count],
            phrase_counts: vec![0; self.phrase_count],
            total: 0,
        };

        let mut w = 0;
        while w < tokens.len() {
            if let Some(step) = self.match_phrase(tokens, w, &mut out) {
                w += step;
                continue;
            }
            if let Some(&i) = self.words.get(&tokens[w].as_ref().to_ascii_lowercase()) {
                out.word_counts[i] += 1;
                out.total += 1;
            }
            w += 1;
        }

        tracing::debug!(toxic = out.total, "classified tokens");
        out
    }

    fn match_phrase<S: AsRef<str>>(&self, tokens: &[S], w: usize, out: &mut Classification) -> Option<usize> {
        if self.phrases.is_empty() {
            return None;
        }
        for len in [2, 3] {
            let Some(window) = tokens.get(w..w + len) else {
                continue;
            };
            if let Some(&i) = self.phrases.get(&normalize::normalize_phrase(window)) {
                out.phrase_counts[i] += 1;
                out.total += 1;
                return Some(len);
            }
        }
        None
    }
}

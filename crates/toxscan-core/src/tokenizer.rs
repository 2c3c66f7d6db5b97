//! Line tokenization.
//!
//! A line is split on a fixed delimiter set, each fragment is normalized,
//! and fragments that are empty, too short, or stopwords are dropped.

use crate::dictionary::StopwordSet;
use crate::normalize::{self, MAX_TOKEN_LEN};

/// Characters that separate fragments.
pub const DELIMITERS: &[char] = &[' ', '\t', '\n', ',', '.', ':', ';', '!', '?', '"', '\''];

/// Tokens extracted from one line plus its sentence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTokens {
    /// Normalized tokens in occurrence order.
    pub tokens: Vec<String>,
    /// Sentence terminators in the raw line.
    pub sentences: usize,
}

impl LineTokens {
    /// True when no token survived filtering.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Count `.`, `!` and `?` in a raw line.
pub fn count_sentence_terminators(line: &str) -> usize {
    line.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}

/// Splits lines into filtered, normalized tokens.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    stopwords: &'a StopwordSet,
    drop_short: bool,
    max_token_len: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenizer that drops single-character tokens and uses the default
    /// length bound.
    pub const fn new(stopwords: &'a StopwordSet) -> Self {
        Self {
            stopwords,
            drop_short: true,
            max_token_len: MAX_TOKEN_LEN,
        }
    }

    /// Toggle dropping of tokens of length one.
    #[must_use]
    pub const fn drop_short(mut self, drop_short: bool) -> Self {
        self.drop_short = drop_short;
        self
    }

    /// Set the byte bound tokens are truncated to.
    #[must_use]
    pub const fn max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Tokenize one line.
    pub fn tokenize(&self, line: &str) -> LineTokens {
        let tokens = line
            .split(DELIMITERS)
            .filter_map(|fragment| self.accept(fragment))
            .collect();
        LineTokens {
            tokens,
            sentences: count_sentence_terminators(line),
        }
    }

    fn accept(&self, fragment: &str) -> Option<String> {
        if fragment.is_empty() {
            return None;
        }
        let token = normalize::truncate_token(normalize::normalize(fragment), self.max_token_len);
        if token.is_empty() || (self.drop_short && token.len() <= 1) {
            return None;
        }
        if self.stopwords.contains(&token) {
            return None;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &str) -> StopwordSet {
        StopwordSet::parse(words, 100)
    }

    #[test]
    fn splits_normalizes_and_filters() {
        let stopwords = stop("are");
        let line = Tokenizer::new(&stopwords).tokenize("Bad bad day. You are bad!");
        assert_eq!(line.tokens, vec!["bad", "bad", "day", "you", "bad"]);
        assert_eq!(line.sentences, 2);
    }

    #[test]
    fn apostrophe_is_a_delimiter() {
        let stopwords = stop("");
        let line = Tokenizer::new(&stopwords).tokenize("don't stop");
        assert_eq!(line.tokens, vec!["don", "stop"]);
    }

    #[test]
    fn inner_punctuation_merges() {
        let stopwords = stop("");
        let line = Tokenizer::new(&stopwords).tokenize("e-mail (test)");
        assert_eq!(line.tokens, vec!["email", "test"]);
    }

    #[test]
    fn short_filter_is_optional() {
        let stopwords = stop("");
        let on = Tokenizer::new(&stopwords).tokenize("I am a cat");
        assert_eq!(on.tokens, vec!["am", "cat"]);
        let off = Tokenizer::new(&stopwords).drop_short(false).tokenize("I am a cat");
        assert_eq!(off.tokens, vec!["i", "am", "a", "cat"]);
    }

    #[test]
    fn empty_fragments_always_dropped() {
        let stopwords = stop("");
        let line = Tokenizer::new(&stopwords).drop_short(false).tokenize("-- ¿¡ ... ok");
        assert_eq!(line.tokens, vec!["ok"]);
    }

    #[test]
    fn stopwords_compare_after_normalization() {
        let stopwords = stop("the");
        let line = Tokenizer::new(&stopwords).tokenize("THE The theme");
        assert_eq!(line.tokens, vec!["theme"]);
    }

    #[test]
    fn long_tokens_are_truncated() {
        let stopwords = stop("");
        let long = "x".repeat(80);
        let line = Tokenizer::new(&stopwords).max_token_len(10).tokenize(&long);
        assert_eq!(line.tokens, vec!["x".repeat(10)]);
    }

    #[test]
    fn sentence_count_uses_raw_line() {
        assert_eq!(count_sentence_terminators("Wait... what?!"), 5);
        assert_eq!(count_sentence_terminators("no terminators"), 0);
        let stopwords = stop("");
        assert!(Tokenizer::new(&stopwords).tokenize("?!.").is_empty());
    }
}

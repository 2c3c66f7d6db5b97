//! End-to-end analysis of a text or CSV source.
//!
//! An [`Analyzer`] owns the dictionaries and the matcher built from them.
//! Every call creates a fresh [`AnalysisState`], so nothing leaks between
//! runs and a failed run leaves earlier results alone.

use std::collections::HashMap;
use std::fs;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{Config, Limits};
use crate::csv::{self, CsvHeader};
use crate::dictionary::{StopwordSet, ToxicDictionary, ToxicTerm};
use crate::error::{AnalysisError, AnalysisOutcome, CapacityExceeded};
use crate::matcher::DictionaryMatcher;
use crate::metrics;
use crate::sort::{self, SortAlgorithm, WordFrequency};
use crate::tokenizer::Tokenizer;
use crate::unique::{self, DedupStrategy, UniqueCountMode, UniqueSet};

/// Rows between progress events.
const PROGRESS_INTERVAL: usize = 5_000;

/// Knobs for one [`Analyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Collection bounds.
    pub limits: Limits,
    /// Drop single-character tokens.
    pub drop_short_tokens: bool,
    /// Token count at which deduplication becomes bounded.
    pub large_corpus_threshold: usize,
    /// Unique tokens collected under bounded deduplication.
    pub large_corpus_unique_cap: usize,
    /// Which unique count feeds lexical diversity.
    pub unique_count: UniqueCountMode,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AnalysisOptions {
    /// Options for single-source analysis.
    pub const fn from_config(config: &Config) -> Self {
        Self {
            limits: config.limits,
            drop_short_tokens: config.drop_short_tokens,
            large_corpus_threshold: config.large_corpus_threshold,
            large_corpus_unique_cap: config.large_corpus_unique_cap,
            unique_count: config.unique_count,
        }
    }

    /// Options for the two-source comparison path.
    pub const fn for_comparison(config: &Config) -> Self {
        let mut options = Self::from_config(config);
        options.drop_short_tokens = config.compare_drop_short_tokens;
        options
    }
}

/// Ordered tokens of one run, bounded by `max_words`.
#[derive(Debug, Clone, Default)]
pub struct WordBuffer {
    words: Vec<String>,
    limit: usize,
}

impl WordBuffer {
    /// Empty buffer holding at most `limit` tokens.
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            words: Vec::new(),
            limit,
        }
    }

    /// Reserve room for `additional` tokens, never past the limit.
    pub fn reserve(&mut self, additional: usize) -> AnalysisOutcome<()> {
        let wanted = additional.min(self.limit.saturating_sub(self.words.len()));
        self.words
            .try_reserve(wanted)
            .map_err(|_| AnalysisError::Allocation {
                what: "word buffer",
                requested: wanted,
            })
    }

    /// Append a token unless the buffer is full.
    pub fn try_push(&mut self, token: String) -> Result<(), CapacityExceeded> {
        if self.words.len() >= self.limit {
            return Err(CapacityExceeded {
                collection: "word buffer",
                limit: self.limit,
            });
        }
        self.words.push(token);
        Ok(())
    }

    /// Tokens so far.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no token has been pushed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn into_inner(self) -> Vec<String> {
        self.words
    }
}

/// Mutable state of a single run.
#[derive(Debug, Default)]
pub struct AnalysisState {
    /// Tokens in occurrence order.
    pub buffer: WordBuffer,
    /// Sentence terminators seen.
    pub sentences: usize,
    /// Lines or data rows consumed.
    pub rows: usize,
    /// Set once the buffer refused a token.
    pub overflow: Option<CapacityExceeded>,
}

impl AnalysisState {
    /// Fresh state for a run bounded by `limits`.
    pub const fn new(limits: &Limits) -> Self {
        Self {
            buffer: WordBuffer::with_limit(limits.max_words),
            sentences: 0,
            rows: 0,
            overflow: None,
        }
    }

    /// Tokenize one line into the buffer. Returns `false` once the buffer
    /// is full.
    fn feed(&mut self, tokenizer: &Tokenizer<'_>, line: &str) -> bool {
        let tokens = tokenizer.tokenize(line);
        self.sentences += tokens.sentences;
        self.rows += 1;
        if self.rows % PROGRESS_INTERVAL == 0 {
            tracing::debug!(rows = self.rows, words = self.buffer.len(), "progress");
        }
        for token in tokens.tokens {
            if let Err(full) = self.buffer.try_push(token) {
                tracing::warn!(limit = full.limit, rows = self.rows, "{full}; remaining input ignored");
                self.overflow = Some(full);
                return false;
            }
        }
        true
    }
}

/// Which collections hit their bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CapacityReport {
    /// The word buffer filled and later input was ignored.
    pub words_truncated: bool,
    /// Deduplication stopped at its bound.
    pub unique_truncated: bool,
    /// The toxic dictionary dropped entries while loading.
    pub dictionary_truncated: bool,
    /// The stopword list dropped entries while loading.
    pub stopwords_truncated: bool,
}

impl CapacityReport {
    /// True when any bound was hit.
    pub const fn any(&self) -> bool {
        self.words_truncated
            || self.unique_truncated
            || self.dictionary_truncated
            || self.stopwords_truncated
    }
}

/// Summary metrics of one analysis.
///
/// The default value is an empty, not-loaded slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// File name or other label of the source.
    pub source_id: String,
    /// Tokens after filtering.
    pub total_words: usize,
    /// Unique tokens, per the configured [`UniqueCountMode`].
    pub unique_words: usize,
    /// Sentence terminators in the raw input.
    pub sentences: usize,
    /// Toxic word hits plus toxic phrase hits.
    pub toxic_occurrences: usize,
    /// Mean token length.
    pub average_word_length: f64,
    /// Words per sentence.
    pub average_sentence_length: f64,
    /// Unique over total words.
    pub lexical_diversity: f64,
    /// Toxic occurrences as a percentage of words.
    pub toxic_ratio: f64,
    /// `100 - toxic_ratio`, or 0 for an empty corpus.
    pub non_toxic_ratio: f64,
    /// True for a result produced by a successful analysis.
    pub loaded: bool,
}

/// Full output of one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Summary metrics.
    pub result: AnalysisResult,
    /// Lines or data rows read.
    pub rows: usize,
    /// Tokens in occurrence order.
    pub words: Vec<String>,
    /// Unique tokens in first-appearance order.
    pub unique: UniqueSet,
    /// Single-word hits with their counts, in dictionary order.
    pub toxic_words: Vec<ToxicTerm>,
    /// Phrase hits with their counts, in dictionary order.
    pub toxic_phrases: Vec<ToxicTerm>,
    /// Bounds hit during the run.
    pub capacity: CapacityReport,
}

impl Analysis {
    /// Occurrence count of every unique word, in first-appearance order.
    pub fn word_frequencies(&self) -> Vec<WordFrequency> {
        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(self.unique.len());
        for word in &self.words {
            *counts.entry(word.as_str()).or_default() += 1;
        }
        self.unique
            .words
            .iter()
            .map(|word| WordFrequency {
                word: word.clone(),
                frequency: counts.get(word.as_str()).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Single-word hits sorted by `algorithm`, highest count first.
    ///
    /// Ties keep dictionary order except under quicksort.
    pub fn toxic_by_count(&self, algorithm: SortAlgorithm) -> AnalysisOutcome<Vec<ToxicTerm>> {
        let mut hits = Vec::new();
        hits.try_reserve_exact(self.toxic_words.len())
            .map_err(|_| AnalysisError::Allocation {
                what: "toxic hit buffer",
                requested: self.toxic_words.len(),
            })?;
        hits.extend_from_slice(&self.toxic_words);
        sort::sort_by(algorithm, &mut hits, |a, b| b.count.cmp(&a.count))?;
        Ok(hits)
    }
}

/// Runs analyses against a fixed pair of dictionaries.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stopwords: StopwordSet,
    dictionary: ToxicDictionary,
    matcher: DictionaryMatcher,
    options: AnalysisOptions,
}

impl Analyzer {
    /// Build the matcher once for all later runs.
    pub fn new(stopwords: StopwordSet, dictionary: ToxicDictionary, options: AnalysisOptions) -> Self {
        let matcher = DictionaryMatcher::new(&dictionary);
        Self {
            stopwords,
            dictionary,
            matcher,
            options,
        }
    }

    /// The toxic dictionary in use.
    pub const fn dictionary(&self) -> &ToxicDictionary {
        &self.dictionary
    }

    /// The stopword set in use.
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// The options in use.
    pub const fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.stopwords)
            .drop_short(self.options.drop_short_tokens)
            .max_token_len(self.options.limits.max_token_len)
    }

    /// Analyze plain text line by line.
    #[tracing::instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn analyze_text(&self, source_id: &str, text: &str) -> AnalysisOutcome<Analysis> {
        let tokenizer = self.tokenizer();
        let mut state = self.start(text.len())?;
        for line in text.lines() {
            if !state.feed(&tokenizer, line) {
                break;
            }
        }
        self.finish(source_id, state)
    }

    /// Analyze the selected 0-indexed columns of every data row.
    ///
    /// The first line is the header and is skipped. Column 0 is used when
    /// `columns` is empty. Columns beyond the header are ignored; if none
    /// remain the run fails with [`AnalysisError::NoColumns`].
    #[tracing::instrument(skip(self, text, columns), fields(bytes = text.len()))]
    pub fn analyze_csv(&self, source_id: &str, text: &str, columns: &[usize]) -> AnalysisOutcome<Analysis> {
        let mut lines = text.lines();
        let Some(header) = lines.next().map(CsvHeader::parse) else {
            return Err(AnalysisError::EmptyContent {
                source_id: source_id.to_string(),
            });
        };

        let selected: Vec<usize> = if columns.is_empty() {
            vec![0]
        } else {
            columns.to_vec()
        };
        let selected: Vec<usize> = selected.into_iter().filter(|&c| c < header.len()).collect();
        if selected.is_empty() {
            return Err(AnalysisError::NoColumns {
                available: header.len(),
            });
        }
        tracing::debug!(columns = ?selected, header = ?header.columns, "csv columns selected");

        let tokenizer = self.tokenizer();
        let max_fields = self.options.limits.max_csv_fields;
        let mut state = self.start(text.len())?;
        for line in lines {
            let fields = csv::split_fields(line, max_fields);
            if !state.feed(&tokenizer, &csv::join_columns(&fields, &selected)) {
                break;
            }
        }
        self.finish(source_id, state)
    }

    /// Read and analyze a file. Files with a `.csv` extension (any case)
    /// are read as CSV; everything else as plain text.
    ///
    /// See [`read_input`] for the size limit and UTF-8 handling.
    pub fn analyze_file(
        &self,
        path: &Utf8Path,
        columns: &[usize],
        max_input_bytes: Option<usize>,
    ) -> AnalysisOutcome<Analysis> {
        let text = read_input(path, max_input_bytes)?;
        let source_id = path.file_name().unwrap_or(path.as_str());
        if is_csv(path) {
            self.analyze_csv(source_id, &text, columns)
        } else {
            self.analyze_text(source_id, &text)
        }
    }

    fn start(&self, input_bytes: usize) -> AnalysisOutcome<AnalysisState> {
        let mut state = AnalysisState::new(&self.options.limits);
        // Rough guess: one token per six bytes of input.
        state.buffer.reserve(input_bytes / 6)?;
        Ok(state)
    }

    fn finish(&self, source_id: &str, state: AnalysisState) -> AnalysisOutcome<Analysis> {
        if state.buffer.is_empty() {
            return Err(AnalysisError::EmptyContent {
                source_id: source_id.to_string(),
            });
        }
        let AnalysisState {
            buffer,
            sentences,
            rows,
            overflow,
        } = state;
        let words = buffer.into_inner();

        let classification = self.matcher.classify(&words);

        let opts = &self.options;
        let strategy = DedupStrategy::for_corpus(
            words.len(),
            opts.large_corpus_threshold,
            opts.large_corpus_unique_cap,
            opts.limits.max_unique,
        );
        let unique = unique::build_unique(&words, strategy);
        let unique_words = match opts.unique_count {
            UniqueCountMode::Capped => unique.len(),
            UniqueCountMode::Exact => unique::count_distinct(&words),
        };

        let total_words = words.len();
        let toxic_occurrences = classification.total;
        let (toxic_ratio, non_toxic_ratio) = metrics::toxicity_ratios(toxic_occurrences, total_words);
        let result = AnalysisResult {
            source_id: source_id.to_string(),
            total_words,
            unique_words,
            sentences,
            toxic_occurrences,
            average_word_length: metrics::average_word_length(&words),
            average_sentence_length: metrics::average_sentence_length(total_words, sentences),
            lexical_diversity: metrics::lexical_diversity(unique_words, total_words),
            toxic_ratio,
            non_toxic_ratio,
            loaded: true,
        };

        let capacity = CapacityReport {
            words_truncated: overflow.is_some(),
            unique_truncated: unique.truncated,
            dictionary_truncated: self.dictionary.truncated(),
            stopwords_truncated: self.stopwords.truncated(),
        };
        if capacity.unique_truncated {
            tracing::warn!(strategy = ?strategy, "unique word set truncated");
        }

        tracing::info!(
            source = source_id,
            rows,
            words = total_words,
            unique = unique_words,
            toxic = toxic_occurrences,
            "analysis complete"
        );

        Ok(Analysis {
            result,
            rows,
            toxic_words: hits(self.dictionary.words(), &classification.word_counts),
            toxic_phrases: hits(self.dictionary.phrases(), &classification.phrase_counts),
            words,
            unique,
            capacity,
        })
    }
}

/// Dictionary terms with a non-zero count, carrying that count.
fn hits(terms: &[ToxicTerm], counts: &[usize]) -> Vec<ToxicTerm> {
    terms
        .iter()
        .zip(counts)
        .filter(|(_, count)| **count > 0)
        .map(|(term, &count)| ToxicTerm {
            count,
            ..term.clone()
        })
        .collect()
}

/// Read a whole input file, refusing files over `max_bytes`.
///
/// The size is checked from metadata before reading. Invalid UTF-8 is
/// replaced rather than rejected; the tokenizer drops non-ASCII anyway.
pub fn read_input(path: &Utf8Path, max_bytes: Option<usize>) -> AnalysisOutcome<String> {
    let io_err = |source| AnalysisError::Io {
        path: path.to_owned(),
        source,
    };
    let size = fs::metadata(path).map_err(io_err)?.len();
    if let Some(limit) = max_bytes
        && size > u64::try_from(limit).unwrap_or(u64::MAX)
    {
        return Err(AnalysisError::InputTooLarge {
            path: path.to_owned(),
            size,
            limit,
        });
    }
    let bytes = fs::read(path).map_err(io_err)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// True for paths ending in `.csv`, compared case-insensitively.
pub fn is_csv(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Severity;

    fn analyzer(stopwords: &str, toxic: &str, options: AnalysisOptions) -> Analyzer {
        let stopwords = StopwordSet::parse(stopwords, options.limits.max_stopwords);
        let dictionary = ToxicDictionary::parse(toxic, &options.limits);
        Analyzer::new(stopwords, dictionary, options)
    }

    #[test]
    fn bad_day_scenario() {
        let a = analyzer("are", "bad,2\n", AnalysisOptions::default());
        let analysis = a.analyze_text("inline", "Bad bad day. You are bad!").unwrap();

        assert_eq!(analysis.words, vec!["bad", "bad", "day", "you", "bad"]);
        let r = &analysis.result;
        assert_eq!(r.total_words, 5);
        assert_eq!(r.unique_words, 3);
        assert_eq!(r.sentences, 2);
        assert_eq!(r.toxic_occurrences, 3);
        assert!((r.toxic_ratio - 60.0).abs() < 1e-9);
        assert!((r.non_toxic_ratio - 40.0).abs() < 1e-9);
        assert!((r.average_sentence_length - 2.5).abs() < 1e-9);
        assert!((r.lexical_diversity - 0.6).abs() < 1e-9);
        assert!(r.loaded);

        assert_eq!(analysis.toxic_words.len(), 1);
        assert_eq!(analysis.toxic_words[0].count, 3);
        assert_eq!(analysis.toxic_words[0].severity, Severity::Moderate);
    }

    #[test]
    fn phrase_and_word_hits_are_separate() {
        let a = analyzer("", "go to hell,3\nhell,2\nidiot,1\n", AnalysisOptions::default());
        let analysis = a
            .analyze_text("inline", "Go to hell now.\nHell, you idiot!")
            .unwrap();
        assert_eq!(analysis.result.toxic_occurrences, 3);
        assert_eq!(analysis.toxic_phrases[0].count, 1);
        let words: Vec<_> = analysis.toxic_words.iter().map(|t| (t.term.as_str(), t.count)).collect();
        assert_eq!(words, vec![("hell", 1), ("idiot", 1)]);
    }

    #[test]
    fn counts_start_fresh_each_run() {
        let a = analyzer("", "bad,1\n", AnalysisOptions::default());
        let first = a.analyze_text("one", "bad bad").unwrap();
        let second = a.analyze_text("two", "bad").unwrap();
        assert_eq!(first.result.toxic_occurrences, 2);
        assert_eq!(second.result.toxic_occurrences, 1);
        assert!(a.dictionary().words().iter().all(|t| t.count == 0));
    }

    #[test]
    fn multi_line_sentences_are_not_double_counted() {
        let a = analyzer("", "", AnalysisOptions::default());
        let analysis = a.analyze_text("inline", "One. Two!\nThree?\n\nfour").unwrap();
        assert_eq!(analysis.result.sentences, 3);
        assert_eq!(analysis.rows, 4);
    }

    #[test]
    fn empty_content_is_an_error() {
        let a = analyzer("the and", "", AnalysisOptions::default());
        let err = a.analyze_text("stops", "The and, a I.").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyContent { ref source_id } if source_id == "stops"));
    }

    #[test]
    fn short_token_filter_follows_options() {
        let mut options = AnalysisOptions::default();
        options.drop_short_tokens = false;
        let a = analyzer("", "", options);
        let analysis = a.analyze_text("inline", "I am a cat").unwrap();
        assert_eq!(analysis.result.total_words, 4);
    }

    #[test]
    fn word_buffer_cutoff_is_reproducible() {
        let mut options = AnalysisOptions::default();
        options.limits.max_words = 4;
        let a = analyzer("", "", options);
        let text = "alpha beta gamma\ndelta epsilon zeta\neta theta";
        let first = a.analyze_text("x", text).unwrap();
        let second = a.analyze_text("x", text).unwrap();
        assert_eq!(first.words, vec!["alpha", "beta", "gamma", "delta"]);
        assert_eq!(first.words, second.words);
        assert!(first.capacity.words_truncated);
        assert!(first.capacity.any());
    }

    #[test]
    fn bounded_dedup_caps_unique_count() {
        let mut options = AnalysisOptions::default();
        options.large_corpus_threshold = 5;
        options.large_corpus_unique_cap = 2;
        let a = analyzer("", "", options);
        let analysis = a.analyze_text("x", "aa bb cc dd aa bb").unwrap();
        assert_eq!(analysis.result.unique_words, 2);
        assert!(analysis.capacity.unique_truncated);

        options.unique_count = UniqueCountMode::Exact;
        let exact = analyzer("", "", options).analyze_text("x", "aa bb cc dd aa bb").unwrap();
        assert_eq!(exact.result.unique_words, 4);
        assert_eq!(exact.unique.len(), 2);
    }

    #[test]
    fn csv_uses_selected_column() {
        let a = analyzer("", "idiot,2\n", AnalysisOptions::default());
        let text = "id,comment\n1,you idiot\n2,\"nice, kind words\"\n";
        let analysis = a.analyze_csv("data.csv", text, &[1]).unwrap();
        assert_eq!(analysis.words, vec!["you", "idiot", "nice", "kind", "words"]);
        assert_eq!(analysis.result.toxic_occurrences, 1);
        assert_eq!(analysis.rows, 2);
    }

    #[test]
    fn csv_defaults_to_first_column_and_joins_many() {
        let a = analyzer("", "", AnalysisOptions::default());
        let text = "\u{feff}title,body\nhello there,general kenobi\n";
        let first = a.analyze_csv("d.csv", text, &[]).unwrap();
        assert_eq!(first.words, vec!["hello", "there"]);
        let both = a.analyze_csv("d.csv", text, &[0, 1]).unwrap();
        assert_eq!(both.words, vec!["hello", "there", "general", "kenobi"]);
    }

    #[test]
    fn csv_rejects_columns_outside_header() {
        let a = analyzer("", "", AnalysisOptions::default());
        let err = a.analyze_csv("d.csv", "a,b\nx,y\n", &[5]).unwrap_err();
        assert!(matches!(err, AnalysisError::NoColumns { available: 2 }));
    }

    #[test]
    fn word_frequencies_follow_first_appearance() {
        let a = analyzer("", "", AnalysisOptions::default());
        let analysis = a.analyze_text("x", "cat dog cat bird cat dog").unwrap();
        let freqs: Vec<_> = analysis
            .word_frequencies()
            .into_iter()
            .map(|f| (f.word, f.frequency))
            .collect();
        assert_eq!(
            freqs,
            vec![
                ("cat".to_string(), 3),
                ("dog".to_string(), 2),
                ("bird".to_string(), 1)
            ]
        );
    }

    #[test]
    fn toxic_by_count_uses_each_algorithm() {
        let a = analyzer("", "aa,1\nbb,2\ncc,3\ndd,1\n", AnalysisOptions::default());
        let analysis = a.analyze_text("x", "cc aa bb bb dd cc cc dd bb bb").unwrap();
        for algorithm in SortAlgorithm::ALL {
            let hits = analysis.toxic_by_count(algorithm).unwrap();
            let counts: Vec<_> = hits.iter().map(|t| (t.term.as_str(), t.count)).collect();
            assert_eq!(counts, vec![("bb", 4), ("cc", 3), ("dd", 2), ("aa", 1)], "{algorithm}");
            assert_eq!(hits[0].severity, Severity::Moderate);
        }
    }

    #[test]
    fn toxic_by_count_ties_keep_dictionary_order_when_stable() {
        let a = analyzer("", "aa,1\nbb,1\ncc,1\n", AnalysisOptions::default());
        let analysis = a.analyze_text("x", "cc bb aa cc").unwrap();
        for algorithm in [SortAlgorithm::Bubble, SortAlgorithm::Merge] {
            let order: Vec<_> = analysis
                .toxic_by_count(algorithm)
                .unwrap()
                .into_iter()
                .map(|t| t.term)
                .collect();
            assert_eq!(order, vec!["cc", "aa", "bb"], "{algorithm}");
        }
    }

    #[test]
    fn analyze_file_detects_csv_and_reports_io() {
        let tmp = tempfile::tempdir().unwrap();
        let root = camino::Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let csv_path = root.join("Comments.CSV");
        fs::write(&csv_path, "text\nwhat a jerk\n").unwrap();
        let txt_path = root.join("notes.txt");
        fs::write(&txt_path, b"caf\xe9 jerk\n").unwrap();

        let a = analyzer("", "jerk,1\n", AnalysisOptions::default());
        let from_csv = a.analyze_file(&csv_path, &[], None).unwrap();
        assert_eq!(from_csv.words, vec!["what", "jerk"]);
        assert_eq!(from_csv.result.source_id, "Comments.CSV");

        let from_txt = a.analyze_file(&txt_path, &[], None).unwrap();
        assert_eq!(from_txt.words, vec!["caf", "jerk"]);

        let missing = a.analyze_file(&root.join("missing.txt"), &[], None).unwrap_err();
        assert!(matches!(missing, AnalysisError::Io { .. }));
    }

    #[test]
    fn analyze_file_enforces_input_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(tmp.path().join("big.txt")).unwrap();
        fs::write(&path, "jerk ".repeat(20)).unwrap();

        let a = analyzer("", "jerk,1\n", AnalysisOptions::default());
        let err = a.analyze_file(&path, &[], Some(10)).unwrap_err();
        assert!(matches!(err, AnalysisError::InputTooLarge { size: 100, limit: 10, .. }));
        assert!(err.to_string().starts_with("input too large"));
        assert_eq!(a.analyze_file(&path, &[], Some(100)).unwrap().result.total_words, 20);
    }

    #[test]
    fn read_input_replaces_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(tmp.path().join("latin1.txt")).unwrap();
        fs::write(&path, b"na\xefve").unwrap();
        let text = read_input(&path, None).unwrap();
        assert!(text.starts_with("na"));
        assert!(text.ends_with("ve"));
    }

    #[test]
    fn empty_csv_is_empty_content() {
        let a = analyzer("", "", AnalysisOptions::default());
        let err = a.analyze_csv("blank.csv", "", &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyContent { ref source_id } if source_id == "blank.csv"));

        let header_only = a.analyze_csv("header.csv", "id,comment\n", &[1]).unwrap_err();
        assert!(matches!(header_only, AnalysisError::EmptyContent { .. }));
    }

    #[test]
    fn csv_ignores_unselected_neighbour_columns() {
        let a = analyzer("", "idiot,2\nmoron,3\njerk,1\n", AnalysisOptions::default());
        let text = "author,comment,reply\n\
                    idiot,have a nice day,moron\n\
                    moron,what a jerk,idiot\n";
        let analysis = a.analyze_csv("three.csv", text, &[1]).unwrap();

        assert_eq!(analysis.words, vec!["have", "nice", "day", "what", "jerk"]);
        assert_eq!(analysis.result.toxic_occurrences, 1);
        let hits: Vec<_> = analysis.toxic_words.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(hits, vec!["jerk"]);
    }

    #[test]
    fn analysis_result_serializes_with_snake_case_metrics() {
        let a = analyzer("are", "bad,2\n", AnalysisOptions::default());
        let analysis = a.analyze_text("inline", "Bad bad day. You are bad!").unwrap();
        let json = serde_json::to_value(&analysis.result).unwrap();
        assert_eq!(json["source_id"], "inline");
        assert_eq!(json["total_words"], 5);
        assert_eq!(json["toxic_occurrences"], 3);
        assert!((json["toxic_ratio"].as_f64().unwrap() - 60.0).abs() < 1e-9);

        let capacity = serde_json::to_value(analysis.capacity).unwrap();
        assert_eq!(capacity["words_truncated"], false);
        let term = serde_json::to_value(&analysis.toxic_words[0]).unwrap();
        assert_eq!(term["severity"], "moderate");
    }

    #[test]
    fn comparison_options_use_their_own_short_filter() {
        let config = Config::default();
        assert!(AnalysisOptions::from_config(&config).drop_short_tokens);
        assert!(!AnalysisOptions::for_comparison(&config).drop_short_tokens);
    }
}

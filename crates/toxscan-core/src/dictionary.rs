//! Stopword and toxic term dictionaries.
//!
//! Stopwords are whitespace-separated tokens compared exactly against
//! normalized tokens. Toxic dictionaries are `term,severity` lines; a term
//! containing a space is a phrase, everything else is a single word.

use std::collections::HashSet;
use std::fs;
use std::io::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use globset::Glob;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::error::{DictionaryError, DictionaryResult};

/// Severity level of a toxic term.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Severity {
    /// Level 1.
    #[default]
    Mild,
    /// Level 2.
    Moderate,
    /// Level 3.
    Severe,
}

impl Severity {
    /// All levels, mildest first.
    pub const ALL: [Self; 3] = [Self::Mild, Self::Moderate, Self::Severe];

    /// Map a numeric level to a severity. Anything outside 1-3 is mild.
    pub const fn from_level(level: i64) -> Self {
        match level {
            2 => Self::Moderate,
            3 => Self::Severe,
            _ => Self::Mild,
        }
    }

    /// Numeric level as written in dictionary files.
    pub const fn level(self) -> u8 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }

    /// What kind of language the level covers.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Mild => "Vulgar Language & Crude Terms",
            Self::Moderate => "Insults & Strong Language",
            Self::Severe => "Hate Speech & Slurs",
        }
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dictionary term with its severity and a per-analysis count.
///
/// Counts are zero inside a [`ToxicDictionary`]; analyses hand out copies
/// carrying their own counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToxicTerm {
    /// The term as written in the dictionary file.
    pub term: String,
    /// Severity level.
    pub severity: Severity,
    /// Occurrences in the analyzed text.
    pub count: usize,
}

impl ToxicTerm {
    /// A term with a zero count.
    pub fn new(term: impl Into<String>, severity: Severity) -> Self {
        Self {
            term: term.into(),
            severity,
            count: 0,
        }
    }
}

/// Read-only set of tokens excluded from analysis.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
    truncated: bool,
}

impl StopwordSet {
    /// Parse whitespace-separated stopwords, keeping at most `limit` entries.
    pub fn parse(text: &str, limit: usize) -> Self {
        let mut words = HashSet::new();
        let mut truncated = false;
        let mut taken = 0usize;
        for word in text.split_whitespace() {
            if taken >= limit {
                truncated = true;
                break;
            }
            words.insert(word.to_string());
            taken += 1;
        }
        Self { words, truncated }
    }

    /// Load a stopword file. A missing file yields an empty set.
    #[tracing::instrument(skip(limit), fields(path = %path))]
    pub fn load(path: &Utf8Path, limit: usize) -> DictionaryResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let set = Self::parse(&text, limit);
                tracing::debug!(count = set.len(), "loaded stopwords");
                Ok(set)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("stopword file not found, continuing without stopwords");
                Ok(Self::default())
            }
            Err(source) => Err(DictionaryError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Exact membership test.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of distinct stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no stopwords are loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when the source held more entries than the limit allowed.
    pub const fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Result of inserting a term into a [`ToxicDictionary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The term was added.
    Added,
    /// A case-insensitive match already exists.
    Duplicate,
    /// The relevant collection is full.
    LimitReached,
}

/// Toxic single words and phrases, in load order.
#[derive(Debug, Clone, Default)]
pub struct ToxicDictionary {
    words: Vec<ToxicTerm>,
    phrases: Vec<ToxicTerm>,
    max_words: usize,
    max_phrases: usize,
    truncated: bool,
}

impl ToxicDictionary {
    /// An empty dictionary bounded by `limits`.
    pub const fn with_limits(limits: &Limits) -> Self {
        Self {
            words: Vec::new(),
            phrases: Vec::new(),
            max_words: limits.max_toxic_words,
            max_phrases: limits.max_toxic_phrases,
            truncated: false,
        }
    }

    /// Parse `term,severity` lines into a new dictionary.
    pub fn parse(text: &str, limits: &Limits) -> Self {
        let mut dict = Self::with_limits(limits);
        dict.extend_from_str(text);
        dict
    }

    /// Parse `term,severity` lines and append them.
    ///
    /// Blank lines are skipped. A missing or unparsable severity is mild.
    /// Entries past the limits are dropped and flagged.
    pub fn extend_from_str(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (term, severity) = match line.split_once(',') {
                Some((term, level)) => (term, Severity::from_level(leading_level(level))),
                None => (line, Severity::Mild),
            };
            if term.is_empty() {
                continue;
            }
            let (list, limit) = if term.contains(' ') {
                (&mut self.phrases, self.max_phrases)
            } else {
                (&mut self.words, self.max_words)
            };
            if list.len() < limit {
                list.push(ToxicTerm::new(term, severity));
            } else {
                self.truncated = true;
            }
        }
    }

    /// Load one dictionary file.
    pub fn load_file(path: &Utf8Path, limits: &Limits) -> DictionaryResult<Self> {
        let mut dict = Self::with_limits(limits);
        dict.extend_from_file(path)?;
        Ok(dict)
    }

    fn extend_from_file(&mut self, path: &Utf8Path) -> DictionaryResult<()> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_owned(),
            source,
        })?;
        self.extend_from_str(&text);
        Ok(())
    }

    /// Load every `*.txt` file in `dir`, falling back to a single file.
    ///
    /// Files are read in file-name order. When `dir` is missing or holds no
    /// `*.txt` file the fallback file is used; when neither has terms the
    /// dictionary is empty.
    #[tracing::instrument(skip(limits), fields(dir = %dir, fallback = %fallback))]
    pub fn load_sources(dir: &Utf8Path, fallback: &Utf8Path, limits: &Limits) -> DictionaryResult<Self> {
        let mut dict = Self::with_limits(limits);

        let files = if dir.is_dir() {
            dictionary_files(dir)?
        } else {
            Vec::new()
        };
        if !files.is_empty() {
            for file in &files {
                tracing::debug!(file = %file, "loading dictionary file");
                dict.extend_from_file(file)?;
            }
            tracing::debug!(
                files = files.len(),
                words = dict.words.len(),
                phrases = dict.phrases.len(),
                "loaded dictionary directory"
            );
        } else if fallback.is_file() {
            dict.extend_from_file(fallback)?;
            tracing::debug!(
                words = dict.words.len(),
                phrases = dict.phrases.len(),
                "loaded fallback dictionary"
            );
        } else {
            tracing::warn!("no toxic dictionary found, continuing with an empty one");
        }

        if dict.truncated {
            tracing::warn!(
                max_words = dict.max_words,
                max_phrases = dict.max_phrases,
                "toxic dictionary truncated at configured limits"
            );
        }
        Ok(dict)
    }

    /// Add a term unless a case-insensitive duplicate exists or the
    /// collection is full.
    pub fn insert(&mut self, term: &str, severity: Severity) -> DictionaryResult<InsertOutcome> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DictionaryError::EmptyTerm);
        }
        if self.contains_term(term) {
            return Ok(InsertOutcome::Duplicate);
        }
        let (list, limit) = if term.contains(' ') {
            (&mut self.phrases, self.max_phrases)
        } else {
            (&mut self.words, self.max_words)
        };
        if list.len() >= limit {
            return Ok(InsertOutcome::LimitReached);
        }
        list.push(ToxicTerm::new(term, severity));
        Ok(InsertOutcome::Added)
    }

    /// Case-insensitive lookup across words and phrases.
    pub fn contains_term(&self, term: &str) -> bool {
        self.words
            .iter()
            .chain(&self.phrases)
            .any(|t| t.term.eq_ignore_ascii_case(term))
    }

    /// Single-word terms.
    pub fn words(&self) -> &[ToxicTerm] {
        &self.words
    }

    /// Multi-word phrases.
    pub fn phrases(&self) -> &[ToxicTerm] {
        &self.phrases
    }

    /// True when a limit dropped entries during loading.
    pub const fn truncated(&self) -> bool {
        self.truncated
    }

    /// True when neither words nor phrases are loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty()
    }
}

/// The integer at the start of `text`, after optional whitespace and
/// sign. Trailing junk is ignored (`"2x"` is 2); no digits reads as 0.
fn leading_level(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative { -value } else { value }
}

/// Sorted list of `*.txt` files directly inside `dir`.
fn dictionary_files(dir: &Utf8Path) -> DictionaryResult<Vec<Utf8PathBuf>> {
    let matcher = Glob::new("*.txt")?.compile_matcher();
    let io_err = |source| DictionaryError::Io {
        path: dir.to_owned(),
        source,
    };

    let mut files = Vec::new();
    for entry in dir.read_dir_utf8().map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_file() && matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Languages with a dedicated dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[allow(missing_docs)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Japanese,
    Chinese,
    Arabic,
    Hindi,
    Malay,
}

impl Language {
    /// Every supported language, in menu order.
    pub const ALL: [Self; 12] = [
        Self::English,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Portuguese,
        Self::Russian,
        Self::Japanese,
        Self::Chinese,
        Self::Arabic,
        Self::Hindi,
        Self::Malay,
    ];

    /// File stem of the language's dictionary.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Italian => "italian",
            Self::Portuguese => "portuguese",
            Self::Russian => "russian",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::Arabic => "arabic",
            Self::Hindi => "hindi",
            Self::Malay => "malay",
        }
    }

    /// Dictionary file for this language inside `dir`.
    pub fn file_in(self, dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(format!("{}.txt", self.as_str()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append `term,severity` to the language file in `dir`, creating both
/// the directory and the file if needed. Returns the file written.
///
/// While `dir` holds no `*.txt` file, [`ToxicDictionary::load_sources`]
/// reads `fallback` instead. Writing the first file would hide those
/// terms, so the fallback is copied into `dir` before appending.
pub fn append_term(
    dir: &Utf8Path,
    fallback: &Utf8Path,
    language: Language,
    term: &str,
    severity: Severity,
) -> DictionaryResult<Utf8PathBuf> {
    let term = term.trim();
    if term.is_empty() {
        return Err(DictionaryError::EmptyTerm);
    }
    fs::create_dir_all(dir).map_err(|source| DictionaryError::Io {
        path: dir.to_owned(),
        source,
    })?;
    if dictionary_files(dir)?.is_empty() && fallback.is_file() {
        seed_from_fallback(dir, fallback)?;
    }

    let path = language.file_in(dir);
    let io_err = |source| DictionaryError::Io {
        path: path.clone(),
        source,
    };
    let unterminated = match fs::read(&path) {
        Ok(bytes) => bytes.last().is_some_and(|&b| b != b'\n'),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
        Err(err) => return Err(io_err(err)),
    };
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)?;
    if unterminated {
        writeln!(file).map_err(io_err)?;
    }
    writeln!(file, "{term},{}", severity.level()).map_err(io_err)?;
    tracing::info!(path = %path, term, severity = %severity, "appended toxic term");
    Ok(path)
}

/// Copy the fallback dictionary into `dir` under its own file name.
fn seed_from_fallback(dir: &Utf8Path, fallback: &Utf8Path) -> DictionaryResult<()> {
    let target = dir.join(fallback.file_name().unwrap_or("toxicwords.txt"));
    fs::copy(fallback, &target).map_err(|source| DictionaryError::Io {
        path: target.clone(),
        source,
    })?;
    tracing::info!(from = %fallback, to = %target, "seeded dictionary directory from fallback");
    Ok(())
}

//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use toxscan_core::analysis::{self, Analysis, AnalysisOptions, Analyzer};
use toxscan_core::config::Config;
use toxscan_core::csv::{self as csv_fields, CsvHeader};
use toxscan_core::dictionary::{StopwordSet, ToxicDictionary};

pub mod analyze;
pub mod bench;
pub mod chart;
pub mod compare;
pub mod dict;
pub mod info;
pub mod report;
pub mod severity;
pub mod words;

/// Directory searched for inputs that are not found as given.
const ANALYSIS_DIR: &str = "analysis";

/// Use `path` if it exists, otherwise `analysis/<path>` if that exists.
pub fn resolve_input(path: &Utf8Path) -> Utf8PathBuf {
    if !path.exists() && path.is_relative() {
        let candidate = Utf8Path::new(ANALYSIS_DIR).join(path);
        if candidate.is_file() {
            tracing::debug!(path = %candidate, "input found in analysis directory");
            return candidate;
        }
    }
    path.to_path_buf()
}

/// Dictionary location overrides shared by every analysing command.
#[derive(Args, Debug, Default, Clone)]
pub struct DictionaryArgs {
    /// Stopword list (overrides `stopwords_file`)
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<Utf8PathBuf>,

    /// Directory of toxic `*.txt` dictionaries (overrides `dictionary_dir`)
    #[arg(long, value_name = "DIR")]
    pub dictionary: Option<Utf8PathBuf>,
}

impl DictionaryArgs {
    /// The stopword file to use.
    pub fn stopwords_file<'a>(&'a self, config: &'a Config) -> &'a Utf8Path {
        self.stopwords.as_deref().unwrap_or(&config.stopwords_file)
    }

    /// The dictionary directory to use.
    pub fn dictionary_dir<'a>(&'a self, config: &'a Config) -> &'a Utf8Path {
        self.dictionary.as_deref().unwrap_or(&config.dictionary_dir)
    }

    /// Load both dictionaries.
    pub fn load(&self, config: &Config) -> anyhow::Result<(StopwordSet, ToxicDictionary)> {
        let stopwords_file = self.stopwords_file(config);
        let stopwords = StopwordSet::load(stopwords_file, config.limits.max_stopwords)
            .with_context(|| format!("failed to load stopwords from {stopwords_file}"))?;
        let dictionary_dir = self.dictionary_dir(config);
        let dictionary = ToxicDictionary::load_sources(
            dictionary_dir,
            &config.dictionary_fallback,
            &config.limits,
        )
        .with_context(|| format!("failed to load toxic dictionary from {dictionary_dir}"))?;
        Ok((stopwords, dictionary))
    }

    /// Load both dictionaries and build an analyzer.
    pub fn analyzer(&self, config: &Config, options: AnalysisOptions) -> anyhow::Result<Analyzer> {
        let (stopwords, dictionary) = self.load(config)?;
        Ok(Analyzer::new(stopwords, dictionary, options))
    }
}

/// An input file plus optional CSV column selection.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Text or CSV file to analyze
    pub file: Utf8PathBuf,

    /// CSV columns to analyze, 1-indexed and comma-separated (e.g. 2,3)
    #[arg(long, value_name = "LIST")]
    pub columns: Option<String>,
}

/// Analyze one source, showing a spinner on a terminal.
///
/// For CSV input only the header row is read up front, to validate
/// `columns` against it.
pub fn analyze_source(
    analyzer: &Analyzer,
    file: &Utf8Path,
    columns: Option<&str>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<Analysis> {
    let path = resolve_input(file);
    let selected = match columns {
        Some(list) if analysis::is_csv(&path) => {
            let header =
                CsvHeader::read(&path).with_context(|| format!("failed to read {path}"))?;
            tracing::debug!(columns = ?header.columns, "csv header");
            csv_fields::parse_column_selection(list, header.len())
                .with_context(|| format!("invalid --columns for {path}"))?
        }
        _ => Vec::new(),
    };

    let source_id = path.file_name().unwrap_or(path.as_str());
    let spinner = spinner(&format!("analyzing {source_id}"))?;
    let outcome = analyzer.analyze_file(&path, &selected, max_input_bytes);
    spinner.finish_and_clear();

    outcome.with_context(|| format!("failed to analyze {path}"))
}

fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

/// Warn on stderr when an analysis hit a capacity bound.
pub fn warn_capacity(analysis: &Analysis) {
    use owo_colors::OwoColorize;

    let capacity = &analysis.capacity;
    if !capacity.any() {
        return;
    }
    let mut notes = Vec::new();
    if capacity.words_truncated {
        notes.push("word buffer full, remaining input ignored");
    }
    if capacity.unique_truncated {
        notes.push("unique word set capped");
    }
    if capacity.dictionary_truncated {
        notes.push("toxic dictionary truncated");
    }
    if capacity.stopwords_truncated {
        notes.push("stopword list truncated");
    }
    eprintln!("{} {}", "warning:".yellow().bold(), notes.join("; "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_overrides_win() {
        let config = Config::default();
        let args = DictionaryArgs {
            stopwords: Some(Utf8PathBuf::from("custom/stop.txt")),
            dictionary: None,
        };
        assert_eq!(args.stopwords_file(&config).as_str(), "custom/stop.txt");
        assert_eq!(args.dictionary_dir(&config).as_str(), "toxic_words");
    }
}

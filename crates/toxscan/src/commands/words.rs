//! Words command: list unique words sorted by the chosen order.

use anyhow::Context;
use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use toxscan_core::analysis::AnalysisOptions;
use toxscan_core::config::Config;
use toxscan_core::sort::{self, SortAlgorithm, WordFrequency};

use super::{DictionaryArgs, SourceArgs};

/// Ordering for the word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordOrder {
    /// Alphabetical.
    #[default]
    Alpha,
    /// Most frequent first.
    Frequency,
    /// Toxic dictionary words by occurrences.
    Toxicity,
}

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,

    /// Sort order
    #[arg(long, value_enum, default_value_t)]
    pub by: WordOrder,

    /// Sorting algorithm (defaults to `sort_algorithm` from config)
    #[arg(long, value_enum)]
    pub algorithm: Option<SortAlgorithm>,

    /// Number of words to show (defaults to `display_limit`; 0 shows all)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct WordsOutput {
    source_id: String,
    order: WordOrder,
    algorithm: SortAlgorithm,
    total: usize,
    words: Vec<WordFrequency>,
}

/// List the unique words of a source.
#[instrument(name = "cmd_words", skip_all, fields(file = %args.source.file))]
pub fn cmd_words(args: WordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let algorithm = args.algorithm.unwrap_or(config.sort_algorithm);
    debug!(order = ?args.by, algorithm = %algorithm, "executing words command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;

    let mut words = match args.by {
        WordOrder::Alpha => {
            let mut entries = analysis.word_frequencies();
            sort::sort_by(algorithm, &mut entries, |a, b| {
                a.word.as_bytes().cmp(b.word.as_bytes())
            })
            .context("failed to sort words")?;
            entries
        }
        WordOrder::Frequency => sort::sort_by_frequency(algorithm, &analysis.word_frequencies())
            .context("failed to sort words")?,
        WordOrder::Toxicity => analysis
            .toxic_by_count(algorithm)
            .context("failed to sort words")?
            .into_iter()
            .filter(|t| t.count > 0)
            .map(|t| WordFrequency {
                word: t.term,
                frequency: t.count,
            })
            .collect(),
    };

    let total = words.len();
    let limit = match args.limit.unwrap_or(config.display_limit) {
        0 => usize::MAX,
        n => n,
    };
    words.truncate(limit);

    let output = WordsOutput {
        source_id: analysis.result.source_id.clone(),
        order: args.by,
        algorithm,
        total,
        words,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    super::warn_capacity(&analysis);
    println!(
        "{} {} ({} sort)",
        output.source_id.bold(),
        format!("{} words", output.total).dimmed(),
        algorithm
    );
    if output.words.is_empty() {
        println!("  {}", "nothing to show".dimmed());
        return Ok(());
    }
    let width = output.words.iter().map(|w| w.word.len()).max().unwrap_or(0);
    for (rank, entry) in output.words.iter().enumerate() {
        println!(
            "  {:>4}. {:<width$} {}",
            rank + 1,
            entry.word,
            entry.frequency.to_string().cyan(),
        );
    }
    if output.words.len() < output.total {
        println!(
            "  {}",
            format!("... {} more", output.total - output.words.len()).dimmed()
        );
    }
    Ok(())
}

//! Analyze command: linguistic and toxicity metrics for one source.

use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use clap::Args;
use toxscan_core::analysis::{AnalysisOptions, AnalysisResult, CapacityReport};
use toxscan_core::config::Config;

use super::{DictionaryArgs, SourceArgs};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    rows: usize,
    toxic_words_found: usize,
    toxic_phrases_found: usize,
    capacity: CapacityReport,
}

/// Analyze a text or CSV file and print its summary metrics.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.source.file))]
pub fn cmd_analyze(args: AnalyzeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.source.file, columns = ?args.source.columns, "executing analyze command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;

    let output = AnalyzeOutput {
        result: &analysis.result,
        rows: analysis.rows,
        toxic_words_found: analysis.toxic_words.iter().filter(|t| t.count > 0).count(),
        toxic_phrases_found: analysis.toxic_phrases.iter().filter(|t| t.count > 0).count(),
        capacity: analysis.capacity,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    super::warn_capacity(&analysis);
    print_result(output.result);
    println!(
        "  {} {} words, {} phrases",
        "Distinct toxic terms:".cyan(),
        output.toxic_words_found,
        output.toxic_phrases_found,
    );
    Ok(())
}

/// Print the metrics block of one result.
fn print_result(result: &AnalysisResult) {
    println!("{}", result.source_id.bold());
    println!("  {} {}", "Total words:".cyan(), result.total_words);
    println!("  {} {}", "Unique words:".cyan(), result.unique_words);
    println!("  {} {}", "Sentences:".cyan(), result.sentences);
    println!(
        "  {} {:.2} characters",
        "Average word length:".cyan(),
        result.average_word_length
    );
    println!(
        "  {} {:.2} words",
        "Average sentence length:".cyan(),
        result.average_sentence_length
    );
    println!(
        "  {} {:.3}",
        "Lexical diversity:".cyan(),
        result.lexical_diversity
    );

    let ratio = format!("{:.2}%", result.toxic_ratio);
    let ratio = if result.toxic_occurrences > 0 {
        ratio.red().to_string()
    } else {
        ratio.green().to_string()
    };
    println!(
        "  {} {} ({} occurrences)",
        "Toxic content:".cyan(),
        ratio,
        result.toxic_occurrences
    );
    println!(
        "  {} {:.2}%",
        "Non-toxic content:".cyan(),
        result.non_toxic_ratio
    );
}

//! Bench command: time every sorting algorithm on a source's words.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toxscan_core::analysis::AnalysisOptions;
use toxscan_core::config::Config;
use toxscan_core::sort;

use super::{DictionaryArgs, SourceArgs};

/// Arguments for the `bench` subcommand.
#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,

    /// Sort every token instead of the unique words
    #[arg(long)]
    pub all_tokens: bool,
}

/// Sort a source's words with bubble, quick and merge sort and compare
/// their timings.
#[instrument(name = "cmd_bench", skip_all, fields(file = %args.source.file))]
pub fn cmd_bench(args: BenchArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(all_tokens = args.all_tokens, "executing bench command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;

    let input = if args.all_tokens {
        &analysis.words
    } else {
        &analysis.unique.words
    };
    let benchmark = sort::benchmark_words(input).context("sort benchmark failed")?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&benchmark)?);
        return Ok(());
    }

    super::warn_capacity(&analysis);
    println!(
        "{} {}",
        analysis.result.source_id.bold(),
        format!("{} words sorted", benchmark.items).dimmed()
    );
    for run in &benchmark.runs {
        let label = format!("{:<7}", run.algorithm.as_str());
        let line = format!("{label} {:.6}s", run.seconds);
        if run.algorithm == benchmark.fastest {
            println!("  {} {}", line.green(), "fastest".green());
        } else {
            println!("  {line}");
        }
    }
    if !benchmark.identical {
        anyhow::bail!("sorting algorithms disagreed on the output order");
    }
    Ok(())
}

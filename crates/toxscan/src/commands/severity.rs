//! Severity command: toxic word occurrences grouped by severity level.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toxscan_core::analysis::AnalysisOptions;
use toxscan_core::config::Config;
use toxscan_core::dictionary::Severity;
use toxscan_core::report::{self, SeverityBreakdown};

use super::{DictionaryArgs, SourceArgs};

/// Arguments for the `severity` subcommand.
#[derive(Args, Debug)]
pub struct SeverityArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

/// Print the severity breakdown of a source's toxic words.
#[instrument(name = "cmd_severity", skip_all, fields(file = %args.source.file))]
pub fn cmd_severity(args: SeverityArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.source.file, "executing severity command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;
    let breakdown = SeverityBreakdown::from_terms(&analysis.toxic_words);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    super::warn_capacity(&analysis);
    println!("{}", analysis.result.source_id.bold());
    print_breakdown(&breakdown);
    Ok(())
}

/// Print one line per level, severe first, then the totals.
fn print_breakdown(breakdown: &SeverityBreakdown) {
    if breakdown.total_occurrences == 0 {
        println!("  {}", "no toxic words found".green());
        return;
    }
    for level in &breakdown.levels {
        let percent = level.percent.unwrap_or_default();
        let heading = format!(
            "{} (level {})",
            capitalized(level.severity),
            level.severity.level()
        );
        let heading = match level.severity {
            Severity::Severe => heading.red().bold().to_string(),
            Severity::Moderate => heading.yellow().bold().to_string(),
            Severity::Mild => heading.bold().to_string(),
        };
        println!("  {heading} {}", level.category.dimmed());
        println!(
            "    [{}] {:>6.2}%  {} occurrences, {} unique terms",
            report::percent_bar(percent),
            percent,
            level.occurrences,
            level.unique_terms,
        );
    }
    println!(
        "  {} {} occurrences, {} unique terms",
        "Total:".cyan(),
        breakdown.total_occurrences,
        breakdown.total_unique
    );
}

const fn capitalized(severity: Severity) -> &'static str {
    match severity {
        Severity::Mild => "Mild",
        Severity::Moderate => "Moderate",
        Severity::Severe => "Severe",
    }
}

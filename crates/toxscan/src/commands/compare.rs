//! Compare command: side-by-side metrics for two sources.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toxscan_core::analysis::AnalysisOptions;
use toxscan_core::compare::{ComparisonReport, ComparisonSlots, Leader, MetricDelta, Slot};
use toxscan_core::config::Config;

use super::DictionaryArgs;

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First source (A)
    pub a: Utf8PathBuf,

    /// Second source (B)
    pub b: Utf8PathBuf,

    /// CSV columns for A, 1-indexed and comma-separated
    #[arg(long, value_name = "LIST")]
    pub columns_a: Option<String>,

    /// CSV columns for B, 1-indexed and comma-separated
    #[arg(long, value_name = "LIST")]
    pub columns_b: Option<String>,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

/// Analyze two sources and print how their metrics differ.
#[instrument(name = "cmd_compare", skip_all, fields(a = %args.a, b = %args.b))]
pub fn cmd_compare(args: CompareArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(a = %args.a, b = %args.b, "executing compare command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::for_comparison(config))?;

    let mut slots = ComparisonSlots::default();
    for (slot, file, columns) in [
        (Slot::A, &args.a, args.columns_a.as_deref()),
        (Slot::B, &args.b, args.columns_b.as_deref()),
    ] {
        let analysis = super::analyze_source(&analyzer, file, columns, config.input_limit())?;
        super::warn_capacity(&analysis);
        slots.store(slot, analysis.result);
    }
    let report = slots.compare()?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ComparisonReport) {
    println!(
        "{} {} {} {}",
        "A:".bold(),
        report.a.source_id.cyan(),
        "B:".bold(),
        report.b.source_id.cyan()
    );
    println!();
    println!(
        "  {:<26} {:>12} {:>12} {:>12} {:>9}",
        "Metric".underline(),
        "A".underline(),
        "B".underline(),
        "A - B".underline(),
        "% of B".underline()
    );
    for delta in &report.metrics {
        println!("{}", metric_row(delta));
    }
}

fn metric_row(delta: &MetricDelta) -> String {
    let value = |v: f64| {
        if delta.metric.is_count() {
            format!("{v:.0}")
        } else {
            format!("{v:.2}")
        }
    };
    let difference = if delta.metric.is_count() {
        format!("{:+.0}", delta.difference)
    } else {
        format!("{:+.2}", delta.difference)
    };
    let percent = delta
        .percent_of_b
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_default();
    let leader = match delta.leader {
        Leader::A => "A higher".yellow().to_string(),
        Leader::B => "B higher".yellow().to_string(),
        Leader::Equal => "equal".dimmed().to_string(),
    };
    format!(
        "  {:<26} {:>12} {:>12} {:>12} {:>9}  {}",
        delta.metric.label(),
        value(delta.a),
        value(delta.b),
        difference,
        percent,
        leader
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxscan_core::analysis::AnalysisResult;

    fn loaded(source: &str, words: usize, toxic: usize) -> AnalysisResult {
        AnalysisResult {
            source_id: source.to_string(),
            total_words: words,
            unique_words: words,
            sentences: 1,
            toxic_occurrences: toxic,
            loaded: true,
            ..AnalysisResult::default()
        }
    }

    #[test]
    fn rows_format_counts_without_decimals() {
        owo_colors::set_override(false);
        let report = toxscan_core::compare::compare(&loaded("a", 12, 2), &loaded("b", 8, 2)).unwrap();
        let row = metric_row(&report.metrics[0]);
        assert!(row.contains("Total Words"));
        assert!(row.contains("+4"));
        assert!(row.contains("50.0%"));
        assert!(row.contains("A higher"));
    }
}

//! Chart command: horizontal bars of toxic word and phrase counts.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toxscan_core::analysis::AnalysisOptions;
use toxscan_core::config::Config;
use toxscan_core::report::{ChartBar, ToxicChart};

use super::{DictionaryArgs, SourceArgs};

/// Widest bar in characters.
const CHART_WIDTH: usize = 40;

/// Arguments for the `chart` subcommand.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,

    /// Bars per section (defaults to `display_limit`; 0 shows all)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Draw a bar chart of the toxic terms found in a source.
#[instrument(name = "cmd_chart", skip_all, fields(file = %args.source.file))]
pub fn cmd_chart(args: ChartArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.source.file, limit = ?args.limit, "executing chart command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;

    let mut chart = ToxicChart::from_analysis(&analysis);
    let limit = match args.limit.unwrap_or(config.display_limit) {
        0 => usize::MAX,
        n => n,
    };
    chart.words.truncate(limit);
    chart.phrases.truncate(limit);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    super::warn_capacity(&analysis);
    println!("{}", analysis.result.source_id.bold());
    if chart.is_empty() {
        println!("  {}", "no toxic terms found".green());
        return Ok(());
    }
    print_section("Toxic words", &chart.words);
    print_section("Toxic phrases", &chart.phrases);
    Ok(())
}

fn print_section(title: &str, bars: &[ChartBar]) {
    if bars.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold().underline());
    let max = bars.iter().map(|b| b.count).max().unwrap_or(1);
    let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
    for bar in bars {
        println!(
            "  {:<label_width$} {} {}",
            bar.label,
            bar_of(bar.count, max).red(),
            bar.count
        );
    }
}

/// A bar proportional to `count / max`, at least one character wide.
fn bar_of(count: usize, max: usize) -> String {
    let len = (count * CHART_WIDTH).div_ceil(max.max(1)).clamp(1, CHART_WIDTH);
    "#".repeat(len)
}

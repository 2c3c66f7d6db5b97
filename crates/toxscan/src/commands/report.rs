//! Report command: write an analysis report as plain text or CSV.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use toxscan_core::analysis::{Analysis, AnalysisOptions, AnalysisResult};
use toxscan_core::config::Config;
use toxscan_core::dictionary::ToxicTerm;
use toxscan_core::report::{self, SeverityBreakdown};

use super::{DictionaryArgs, SourceArgs};

/// Toxic words listed in a text report.
pub const TEXT_TOP_TERMS: usize = 10;
/// Toxic words listed in a CSV report.
pub const CSV_TOP_TERMS: usize = 15;

const RULE: &str = "========================================";

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text.
    #[default]
    Txt,
    /// Comma-separated sections for spreadsheets.
    Csv,
}

impl ReportFormat {
    const fn default_file(self) -> &'static str {
        match self {
            Self::Txt => "analysis_report.txt",
            Self::Csv => "analysis_report.csv",
        }
    }
}

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Input file and CSV columns.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t)]
    pub format: ReportFormat,

    /// Output file (`-` for stdout; defaults to analysis_report.<format>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    path: &'a str,
    format: ReportFormat,
    result: &'a AnalysisResult,
}

/// Analyze a source and save the report.
#[instrument(name = "cmd_report", skip_all, fields(file = %args.source.file))]
pub fn cmd_report(args: ReportArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(format = ?args.format, output = ?args.output, "executing report command");

    let analyzer = args
        .dictionaries
        .analyzer(config, AnalysisOptions::from_config(config))?;
    let analysis = super::analyze_source(
        &analyzer,
        &args.source.file,
        args.source.columns.as_deref(),
        config.input_limit(),
    )?;

    let output = args
        .output
        .unwrap_or_else(|| Utf8PathBuf::from(args.format.default_file()));

    if output.as_str() == "-" {
        let stdout = io::stdout();
        return write_report(args.format, &analysis, stdout.lock()).context("failed to write report");
    }

    let file = File::create(&output).with_context(|| format!("failed to create {output}"))?;
    let mut writer = BufWriter::new(file);
    write_report(args.format, &analysis, &mut writer)
        .with_context(|| format!("failed to write {output}"))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {output}"))?;
    info!(path = %output, format = ?args.format, "report saved");

    if global_json {
        let saved = ReportOutput {
            path: output.as_str(),
            format: args.format,
            result: &analysis.result,
        };
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        super::warn_capacity(&analysis);
        println!("{} {}", "Report saved to".green(), output.cyan());
    }
    Ok(())
}

fn write_report<W: Write>(format: ReportFormat, analysis: &Analysis, out: W) -> anyhow::Result<()> {
    match format {
        ReportFormat::Txt => write_text_report(analysis, out)?,
        ReportFormat::Csv => write_csv_report(analysis, out)?,
    }
    Ok(())
}

fn severity_label(term: &ToxicTerm) -> String {
    term.severity.as_str().to_uppercase()
}

/// Write the plain-text report.
pub fn write_text_report<W: Write>(analysis: &Analysis, mut out: W) -> io::Result<()> {
    let r = &analysis.result;
    writeln!(out, "{RULE}")?;
    writeln!(out, "       TEXT ANALYSIS REPORT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Source: {}", r.source_id)?;
    writeln!(out)?;

    writeln!(out, "--- General Statistics ---")?;
    writeln!(out, "Total words: {}", r.total_words)?;
    writeln!(out, "Unique words: {}", r.unique_words)?;
    writeln!(out, "Total sentences: {}", r.sentences)?;
    writeln!(out, "Average word length: {:.2}", r.average_word_length)?;
    writeln!(out, "Average sentence length: {:.2} words", r.average_sentence_length)?;
    writeln!(out, "Lexical diversity index: {:.4}", r.lexical_diversity)?;
    writeln!(out)?;

    writeln!(out, "--- Toxicity Metrics ---")?;
    writeln!(out, "Total toxic occurrences: {}", r.toxic_occurrences)?;
    writeln!(out, "Toxic ratio: {:.2}%", r.toxic_ratio)?;
    writeln!(out, "Non-toxic ratio: {:.2}%", r.non_toxic_ratio)?;
    writeln!(out)?;

    let breakdown = SeverityBreakdown::from_terms(&analysis.toxic_words);
    writeln!(out, "--- Severity Breakdown ---")?;
    for level in &breakdown.levels {
        writeln!(
            out,
            "{} ({}):",
            level.severity.as_str().to_uppercase(),
            level.category
        )?;
        writeln!(
            out,
            "  Occurrences: {} | Unique words: {}",
            level.occurrences, level.unique_terms
        )?;
    }
    writeln!(out)?;

    writeln!(out, "--- Top {TEXT_TOP_TERMS} Toxic Words Detected ---")?;
    let top = report::top_toxic_terms(&analysis.toxic_words, TEXT_TOP_TERMS);
    if top.is_empty() {
        writeln!(out, "No toxic words detected.")?;
    }
    for (rank, term) in top.iter().enumerate() {
        writeln!(
            out,
            "{}. {} (Freq: {}, Severity: {})",
            rank + 1,
            term.term,
            term.count,
            severity_label(term)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Prefix cells a spreadsheet would treat as a formula.
pub fn csv_safe_cell(cell: String) -> String {
    if cell.starts_with(['=', '+', '-', '@']) {
        format!("'{cell}")
    } else {
        cell
    }
}

/// Write the CSV report: one titled section per block.
pub fn write_csv_report<W: Write>(analysis: &Analysis, out: W) -> csv::Result<()> {
    let r = &analysis.result;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    wtr.write_record(["GENERAL STATISTICS"])?;
    wtr.write_record(["Metric", "Value"])?;
    metric(&mut wtr, "Source", csv_safe_cell(r.source_id.clone()))?;
    metric(&mut wtr, "Total Words", r.total_words)?;
    metric(&mut wtr, "Unique Words", r.unique_words)?;
    metric(&mut wtr, "Total Sentences", r.sentences)?;
    metric(&mut wtr, "Average Word Length", format!("{:.2}", r.average_word_length))?;
    metric(
        &mut wtr,
        "Average Sentence Length (words)",
        format!("{:.2}", r.average_sentence_length),
    )?;
    metric(&mut wtr, "Lexical Diversity Index", format!("{:.4}", r.lexical_diversity))?;

    wtr.write_record(["TOXICITY METRICS"])?;
    wtr.write_record(["Metric", "Value"])?;
    metric(&mut wtr, "Total Toxic Occurrences", r.toxic_occurrences)?;
    metric(&mut wtr, "Toxic Ratio (%)", format!("{:.2}", r.toxic_ratio))?;
    metric(&mut wtr, "Non-Toxic Ratio (%)", format!("{:.2}", r.non_toxic_ratio))?;

    let breakdown = SeverityBreakdown::from_terms(&analysis.toxic_words);
    wtr.write_record(["SEVERITY BREAKDOWN"])?;
    wtr.write_record(["Severity Level", "Occurrences", "Unique Words"])?;
    for level in &breakdown.levels {
        wtr.write_record([
            level.severity.as_str().to_uppercase(),
            level.occurrences.to_string(),
            level.unique_terms.to_string(),
        ])?;
    }

    wtr.write_record(["TOP TOXIC WORDS DETECTED"])?;
    wtr.write_record(["Rank", "Word", "Frequency", "Severity"])?;
    let top = report::top_toxic_terms(&analysis.toxic_words, CSV_TOP_TERMS);
    if top.is_empty() {
        wtr.write_record(["1", "No toxic words detected", "0", "N/A"])?;
    }
    for (rank, term) in top.iter().enumerate() {
        wtr.write_record([
            (rank + 1).to_string(),
            csv_safe_cell(term.term.clone()),
            term.count.to_string(),
            severity_label(term),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn metric<W: Write>(
    wtr: &mut csv::Writer<W>,
    label: &str,
    value: impl std::fmt::Display,
) -> csv::Result<()> {
    wtr.write_record([label, value.to_string().as_str()])
}

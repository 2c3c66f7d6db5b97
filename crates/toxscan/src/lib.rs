//! Library interface for the `toxscan` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, toxscan=trace)
    TOXSCAN_LOG_PATH       Explicit log file path
    TOXSCAN_LOG_DIR        Log directory
    TOXSCAN_<KEY>          Any config key (e.g., TOXSCAN_SORT_ALGORITHM=merge,
                           TOXSCAN_LIMITS__MAX_WORDS=5000)
";
/// Command-line interface definition for toxscan.
#[derive(Parser)]
#[command(name = "toxscan")]
#[command(
    about = "Toxic term detection and linguistic metrics for text and CSV corpora",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Word counts, linguistic metrics and toxicity ratios
    Analyze(commands::analyze::AnalyzeArgs),

    /// List unique words alphabetically, by frequency or by toxicity
    Words(commands::words::WordsArgs),

    /// Time bubble, quick and merge sort on the words of a file
    Bench(commands::bench::BenchArgs),

    /// Compare the metrics of two files
    Compare(commands::compare::CompareArgs),

    /// Toxic words grouped by severity
    Severity(commands::severity::SeverityArgs),

    /// Bar chart of toxic words and phrases
    Chart(commands::chart::ChartArgs),

    /// Save an analysis report as text or CSV
    Report(commands::report::ReportArgs),

    /// Manage toxic term dictionaries
    Dict(commands::dict::DictArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

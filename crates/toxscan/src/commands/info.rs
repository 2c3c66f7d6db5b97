//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use toxscan_core::config::{Config, ConfigSources, Limits};
use toxscan_core::sort::SortAlgorithm;
use toxscan_core::unique::UniqueCountMode;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    stopwords_file: String,
    dictionary_dir: String,
    dictionary_fallback: String,
    sort_algorithm: SortAlgorithm,
    unique_count: UniqueCountMode,
    drop_short_tokens: bool,
    compare_drop_short_tokens: bool,
    display_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    limits: Limits,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            stopwords_file: config.stopwords_file.to_string(),
            dictionary_dir: config.dictionary_dir.to_string(),
            dictionary_fallback: config.dictionary_fallback.to_string(),
            sort_algorithm: config.sort_algorithm,
            unique_count: config.unique_count,
            drop_short_tokens: config.drop_short_tokens,
            compare_drop_short_tokens: config.compare_drop_short_tokens,
            display_limit: config.display_limit,
            max_input_bytes: config.input_limit(),
            limits: config.limits,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            full_info.package.name.bold(),
            full_info.package.version.green()
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        if !full_info.package.license.is_empty() {
            println!("{}: {}", "License".dimmed(), full_info.package.license);
        }
        if !full_info.package.repository.is_empty() {
            println!(
                "{}: {}",
                "Repository".dimmed(),
                full_info.package.repository.cyan()
            );
        }
        if !full_info.package.homepage.is_empty() {
            println!(
                "{}: {}",
                "Homepage".dimmed(),
                full_info.package.homepage.cyan()
            );
        }

        // Configuration section
        println!();
        println!("{}", "Configuration".bold().underline());
        if let Some(ref path) = full_info.config.config_file {
            println!("{}: {}", "Config file".dimmed(), path.cyan());
        } else {
            println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
        }
        println!("{}: {}", "Log level".dimmed(), full_info.config.log_level);
        if let Some(ref dir) = full_info.config.log_dir {
            println!("{}: {}", "Log directory".dimmed(), dir);
        }

        println!(
            "{}: {}",
            "Stopwords".dimmed(),
            full_info.config.stopwords_file
        );
        println!(
            "{}: {} (fallback {})",
            "Dictionaries".dimmed(),
            full_info.config.dictionary_dir,
            full_info.config.dictionary_fallback
        );

        // Analysis defaults
        println!();
        println!("{}", "Analysis".bold().underline());
        println!(
            "{}: {}",
            "Sort algorithm".dimmed(),
            full_info.config.sort_algorithm
        );
        println!(
            "{}: {:?}",
            "Unique count".dimmed(),
            full_info.config.unique_count
        );
        println!(
            "{}: {} (compare: {})",
            "Drop short tokens".dimmed(),
            full_info.config.drop_short_tokens,
            full_info.config.compare_drop_short_tokens
        );
        println!(
            "{}: {}",
            "Display limit".dimmed(),
            full_info.config.display_limit
        );
        print_opt("Max input bytes", &full_info.config.max_input_bytes);
        let limits = &full_info.config.limits;
        println!(
            "{}: words {}, unique {}, stopwords {}, toxic words {}, toxic phrases {}",
            "Limits".dimmed(),
            limits.max_words,
            limits.max_unique,
            limits.max_stopwords,
            limits.max_toxic_words,
            limits.max_toxic_phrases
        );
    }

    Ok(())
}

/// Print an optional limit or "unlimited".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "unlimited".dimmed()),
    }
}

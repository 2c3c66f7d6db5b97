//! Dict command: inspect and extend the toxic term dictionaries.

use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use toxscan_core::config::Config;
use toxscan_core::dictionary::{self, InsertOutcome, Language, Severity};

use super::DictionaryArgs;

/// Arguments for the `dict` subcommand.
#[derive(Args, Debug)]
pub struct DictArgs {
    /// The operation to run.
    #[command(subcommand)]
    pub action: DictAction,
}

/// Dictionary operations.
#[derive(Subcommand, Debug)]
pub enum DictAction {
    /// Add a toxic word or phrase to a language file
    Add(AddArgs),
    /// Show how many terms are loaded
    Stats(StatsArgs),
}

/// Arguments for `dict add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Language file to append to
    #[arg(value_enum)]
    pub language: Language,

    /// Word or phrase to add
    pub term: String,

    /// Severity of the term
    #[arg(long, short, value_enum, default_value_t)]
    pub severity: Severity,

    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

/// Arguments for `dict stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Dictionary overrides.
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

#[derive(Serialize)]
struct Added<'a> {
    term: &'a str,
    severity: Severity,
    language: Language,
    path: String,
}

#[derive(Serialize)]
struct SeverityCount {
    severity: Severity,
    terms: usize,
}

#[derive(Serialize)]
struct DictStats {
    dictionary_dir: String,
    words: usize,
    phrases: usize,
    by_severity: Vec<SeverityCount>,
    dictionary_truncated: bool,
    stopwords: usize,
    stopwords_truncated: bool,
}

/// Run a dictionary subcommand.
#[instrument(name = "cmd_dict", skip_all)]
pub fn cmd_dict(args: DictArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    match args.action {
        DictAction::Add(add) => cmd_add(&add, global_json, config),
        DictAction::Stats(stats) => cmd_stats(&stats, global_json, config),
    }
}

fn cmd_add(args: &AddArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(language = %args.language, severity = %args.severity, "executing dict add");

    let (_, mut loaded) = args.dictionaries.load(config)?;
    let term = args.term.trim();
    match loaded.insert(term, args.severity)? {
        InsertOutcome::Added => {}
        InsertOutcome::Duplicate => anyhow::bail!("'{term}' is already in the dictionary"),
        InsertOutcome::LimitReached => anyhow::bail!(
            "dictionary is full (max_toxic_words = {}, max_toxic_phrases = {})",
            config.limits.max_toxic_words,
            config.limits.max_toxic_phrases
        ),
    }

    let dir = args.dictionaries.dictionary_dir(config);
    let path = dictionary::append_term(
        dir,
        &config.dictionary_fallback,
        args.language,
        term,
        args.severity,
    )?;

    if global_json {
        let added = Added {
            term,
            severity: args.severity,
            language: args.language,
            path: path.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        println!(
            "{} '{}' ({}) to {}",
            "Added".green(),
            term.bold(),
            args.severity,
            path.cyan()
        );
    }
    Ok(())
}

fn cmd_stats(args: &StatsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing dict stats");

    let (stopwords, loaded) = args.dictionaries.load(config)?;
    let by_severity = Severity::ALL
        .iter()
        .map(|&severity| SeverityCount {
            severity,
            terms: loaded
                .words()
                .iter()
                .chain(loaded.phrases())
                .filter(|t| t.severity == severity)
                .count(),
        })
        .collect();
    let stats = DictStats {
        dictionary_dir: args.dictionaries.dictionary_dir(config).to_string(),
        words: loaded.words().len(),
        phrases: loaded.phrases().len(),
        by_severity,
        dictionary_truncated: loaded.truncated(),
        stopwords: stopwords.len(),
        stopwords_truncated: stopwords.truncated(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Dictionary".bold().underline());
    println!("{}: {}", "Directory".dimmed(), stats.dictionary_dir.cyan());
    println!("{}: {}", "Words".dimmed(), stats.words);
    println!("{}: {}", "Phrases".dimmed(), stats.phrases);
    for count in &stats.by_severity {
        println!("  {}: {}", count.severity.as_str().dimmed(), count.terms);
    }
    if stats.dictionary_truncated {
        println!("{}", "truncated at configured limits".yellow());
    }
    println!("{}: {}", "Stopwords".dimmed(), stats.stopwords);
    if stats.stopwords_truncated {
        println!("{}", "stopword list truncated".yellow());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn fixture() -> (tempfile::TempDir, DictionaryArgs) {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::create_dir(root.join("toxic")).unwrap();
        std::fs::write(root.join("toxic/english.txt"), "idiot,2\n").unwrap();
        std::fs::write(root.join("stop.txt"), "the a an").unwrap();
        let args = DictionaryArgs {
            stopwords: Some(root.join("stop.txt")),
            dictionary: Some(root.join("toxic")),
        };
        (tmp, args)
    }

    #[test]
    fn add_appends_new_term() {
        let (tmp, dictionaries) = fixture();
        let args = AddArgs {
            language: Language::Spanish,
            term: "tonto".to_string(),
            severity: Severity::Mild,
            dictionaries,
        };
        cmd_add(&args, true, &Config::default()).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("toxic/spanish.txt")).unwrap();
        assert_eq!(written, "tonto,1\n");
    }

    #[test]
    fn add_rejects_duplicates_case_insensitively() {
        let (tmp, dictionaries) = fixture();
        let args = AddArgs {
            language: Language::English,
            term: "IDIOT".to_string(),
            severity: Severity::Severe,
            dictionaries,
        };
        let err = cmd_add(&args, false, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("already in the dictionary"));
        let unchanged = std::fs::read_to_string(tmp.path().join("toxic/english.txt")).unwrap();
        assert_eq!(unchanged, "idiot,2\n");
    }

    #[test]
    fn add_respects_limits() {
        let (_tmp, dictionaries) = fixture();
        let mut config = Config::default();
        config.limits.max_toxic_words = 1;
        let args = AddArgs {
            language: Language::English,
            term: "moron".to_string(),
            severity: Severity::Moderate,
            dictionaries,
        };
        let err = cmd_add(&args, false, &config).unwrap_err();
        assert!(err.to_string().contains("dictionary is full"));
    }

    #[test]
    fn add_with_only_fallback_keeps_its_terms() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::write(root.join("toxicwords.txt"), "idiot,2\nshut up,1\n").unwrap();
        std::fs::write(root.join("stop.txt"), "the a an").unwrap();
        let mut config = Config::default();
        config.dictionary_fallback = root.join("toxicwords.txt");
        let dictionaries = DictionaryArgs {
            stopwords: Some(root.join("stop.txt")),
            dictionary: Some(root.join("toxic")),
        };
        let args = AddArgs {
            language: Language::English,
            term: "moron".to_string(),
            severity: Severity::Severe,
            dictionaries: dictionaries.clone(),
        };
        cmd_add(&args, true, &config).unwrap();

        let (_, reloaded) = dictionaries.load(&config).unwrap();
        let words: Vec<_> = reloaded.words().iter().map(|t| t.term.as_str()).collect();
        assert_eq!(words, vec!["moron", "idiot"]);
        assert_eq!(reloaded.phrases()[0].term, "shut up");

        let again = AddArgs {
            term: "idiot".to_string(),
            ..args
        };
        let err = cmd_add(&again, false, &config).unwrap_err();
        assert!(err.to_string().contains("already in the dictionary"));
    }

    #[test]
    fn stats_runs() {
        let (_tmp, dictionaries) = fixture();
        assert!(cmd_stats(&StatsArgs { dictionaries }, true, &Config::default()).is_ok());
    }
}

//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("TOXSCAN_LOG_DIR", std::env::temp_dir());
    cmd
}

// =============================================================================
// Help, version, info
// =============================================================================

#[test]
fn help_lists_analysis_commands() {
    for flag in ["--help", "-h"] {
        let output = cmd().arg(flag).output().unwrap();
        assert!(output.status.success());
        let help = String::from_utf8_lossy(&output.stdout);
        for command in ["analyze", "words", "bench", "compare", "report", "dict"] {
            assert!(help.contains(command), "{flag} should list {command}");
        }
    }
}

#[test]
fn version_flags() {
    for flag in ["--version", "-V"] {
        cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn info_json_describes_package_and_dictionaries() {
    let tmp = TempDir::new().unwrap();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["dictionary_dir"], "toxic_words");
    assert_eq!(json["config"]["max_input_bytes"], 64 * 1024 * 1024);
}

#[test]
fn info_text_names_the_package() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")));
}

// =============================================================================
// Fixture
// =============================================================================

/// A working directory with a stopword list, a toxic dictionary and inputs
/// placed where the default config looks for them.
fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("stopwords.txt"), "are the").unwrap();
    fs::create_dir(root.join("toxic_words")).unwrap();
    fs::write(root.join("toxic_words/english.txt"), "bad,2\nshut up,1\n").unwrap();
    fs::write(root.join("sample.txt"), "Bad bad day. You are bad!").unwrap();
    fs::write(root.join("clean.txt"), "What a lovely calm day.").unwrap();
    fs::write(
        root.join("reviews.csv"),
        "id,comment\n1,Bad bad day\n2,You are bad!\n",
    )
    .unwrap();
    tmp
}

fn in_fixture(dir: &TempDir) -> Command {
    let mut cmd = cmd();
    cmd.args(["--color", "never", "-C", dir.path().to_str().unwrap()]);
    cmd
}

fn json_of(dir: &TempDir, args: &[&str]) -> Value {
    let output = in_fixture(dir)
        .arg("--json")
        .args(args)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Global flags
// =============================================================================

#[test]
fn logging_and_color_flags_do_not_change_results() {
    let dir = fixture();
    let baseline = json_of(&dir, &["analyze", "sample.txt"]);
    let flag_sets: [&[&str]; 6] = [
        &["-q"],
        &["--quiet"],
        &["-v"],
        &["-vv"],
        &["--color", "always"],
        &["--color", "auto"],
    ];
    for flags in flag_sets {
        let output = cmd()
            .args(flags)
            .args(["-C", dir.path().to_str().unwrap(), "--json", "analyze", "sample.txt"])
            .output()
            .unwrap();
        assert!(output.status.success(), "{flags:?}");
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json, baseline, "{flags:?}");
    }
}

#[test]
fn quiet_suppresses_capacity_log() {
    let dir = fixture();
    in_fixture(&dir)
        .env_remove("RUST_LOG")
        .env("TOXSCAN_LIMITS__MAX_WORDS", "1")
        .args(["-q", "analyze", "sample.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("word buffer full"))
        .stderr(predicate::str::contains("WARN").not());
}

// =============================================================================
// Analyze
// =============================================================================

#[test]
fn analyze_json_reports_counts() {
    let dir = fixture();
    let json = json_of(&dir, &["analyze", "sample.txt"]);

    assert_eq!(json["source_id"], "sample.txt");
    assert_eq!(json["total_words"], 5);
    assert_eq!(json["unique_words"], 3);
    assert_eq!(json["sentences"], 2);
    assert_eq!(json["toxic_occurrences"], 3);
    assert_eq!(json["toxic_ratio"], 60.0);
    assert_eq!(json["loaded"], true);
}

#[test]
fn analyze_text_output_shows_metrics() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["analyze", "sample.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total words: 5"))
        .stdout(predicate::str::contains("60.00%"));
}

#[test]
fn analyze_csv_selected_column() {
    let dir = fixture();
    let json = json_of(&dir, &["analyze", "reviews.csv", "--columns", "2"]);
    assert_eq!(json["rows"], 2);
    assert_eq!(json["total_words"], 5);
    assert_eq!(json["toxic_occurrences"], 3);
}

#[test]
fn analyze_csv_rejects_out_of_range_columns() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["analyze", "reviews.csv", "--columns", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid columns"));
}

#[test]
fn analyze_finds_inputs_in_analysis_dir() {
    let dir = fixture();
    fs::create_dir(dir.path().join("analysis")).unwrap();
    fs::write(dir.path().join("analysis/moved.txt"), "bad things happen").unwrap();
    let json = json_of(&dir, &["analyze", "moved.txt"]);
    assert_eq!(json["toxic_occurrences"], 1);
}

#[test]
fn analyze_missing_file_fails() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["analyze", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn analyze_only_stopwords_fails() {
    let dir = fixture();
    fs::write(dir.path().join("empty.txt"), "the are a").unwrap();
    in_fixture(&dir)
        .args(["analyze", "empty.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no content to analyze"));
}

#[test]
fn analyze_respects_input_limit() {
    let dir = fixture();
    in_fixture(&dir)
        .env("TOXSCAN_MAX_INPUT_BYTES", "4")
        .args(["analyze", "sample.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn dictionary_override_flag() {
    let dir = fixture();
    fs::create_dir(dir.path().join("other")).unwrap();
    fs::write(dir.path().join("other/words.txt"), "day,1\n").unwrap();
    let json = json_of(&dir, &["analyze", "sample.txt", "--dictionary", "other"]);
    assert_eq!(json["toxic_occurrences"], 1);
}

// =============================================================================
// Words, Bench, Severity, Chart
// =============================================================================

#[test]
fn words_by_frequency() {
    let dir = fixture();
    let json = json_of(&dir, &["words", "sample.txt", "--by", "frequency"]);
    assert_eq!(json["total"], 3);
    assert_eq!(json["words"][0]["word"], "bad");
    assert_eq!(json["words"][0]["frequency"], 3);
}

#[test]
fn words_alphabetical_with_merge_sort() {
    let dir = fixture();
    let json = json_of(&dir, &["words", "sample.txt", "--algorithm", "merge"]);
    assert_eq!(json["algorithm"], "merge");
    let words: Vec<&str> = json["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect();
    assert_eq!(words, vec!["bad", "day", "you"]);
}

#[test]
fn words_by_toxicity_with_each_algorithm() {
    let dir = fixture();
    fs::create_dir(dir.path().join("rude")).unwrap();
    fs::write(dir.path().join("rude/english.txt"), "aa,1\nbb,2\ncc,3\nzz,1\n").unwrap();
    fs::write(dir.path().join("rude.txt"), "aa bb bb cc cc cc").unwrap();

    for algorithm in ["bubble", "quick", "merge"] {
        let json = json_of(
            &dir,
            &[
                "words", "rude.txt", "--by", "toxicity", "--algorithm", algorithm,
                "--dictionary", "rude",
            ],
        );
        assert_eq!(json["algorithm"], algorithm);
        let ranked: Vec<(&str, u64)> = json["words"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| (w["word"].as_str().unwrap(), w["frequency"].as_u64().unwrap()))
            .collect();
        assert_eq!(ranked, vec![("cc", 3), ("bb", 2), ("aa", 1)], "{algorithm}");
    }
}

#[test]
fn bench_runs_every_algorithm() {
    let dir = fixture();
    let json = json_of(&dir, &["bench", "sample.txt", "--all-tokens"]);
    assert_eq!(json["items"], 5);
    assert_eq!(json["runs"].as_array().unwrap().len(), 3);
    assert_eq!(json["identical"], true);
}

#[test]
fn severity_groups_hits() {
    let dir = fixture();
    let json = json_of(&dir, &["severity", "sample.txt"]);
    assert_eq!(json["total_occurrences"], 3);
    assert_eq!(json["levels"][1]["severity"], "moderate");
    assert_eq!(json["levels"][1]["occurrences"], 3);
    assert_eq!(json["levels"][1]["percent"], 100.0);
}

#[test]
fn chart_lists_words_and_phrases() {
    let dir = fixture();
    fs::write(dir.path().join("rude.txt"), "Shut up, bad bot.").unwrap();
    let json = json_of(&dir, &["chart", "rude.txt"]);
    assert_eq!(json["words"][0]["label"], "bad");
    assert_eq!(json["phrases"][0]["label"], "shut up");
    assert_eq!(json["phrases"][0]["count"], 1);
}

// =============================================================================
// Compare
// =============================================================================

#[test]
fn compare_reports_all_metrics() {
    let dir = fixture();
    let json = json_of(&dir, &["compare", "sample.txt", "clean.txt"]);
    assert_eq!(json["a"]["source_id"], "sample.txt");
    assert_eq!(json["b"]["source_id"], "clean.txt");
    let metrics = json["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 7);
    let toxic = metrics
        .iter()
        .find(|m| m["metric"] == "toxic_occurrences")
        .unwrap();
    assert_eq!(toxic["leader"], "a");
}

#[test]
fn compare_fails_when_one_side_fails() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["compare", "sample.txt", "missing.txt"])
        .assert()
        .failure();
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn report_writes_text_file() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["report", "sample.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("analysis_report.txt"));
    let text = fs::read_to_string(dir.path().join("analysis_report.txt")).unwrap();
    assert!(text.contains("--- General Statistics ---"));
    assert!(text.contains("1. bad (Freq: 3, Severity: MODERATE)"));
}

#[test]
fn report_writes_csv_file() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["report", "sample.txt", "--format", "csv", "-o", "out.csv"])
        .assert()
        .success();
    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(csv.contains("GENERAL STATISTICS"));
    assert!(csv.contains("Total Words,5"));
    assert!(csv.contains("1,bad,3,MODERATE"));
}

#[test]
fn report_to_stdout() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["report", "sample.txt", "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEXT ANALYSIS REPORT"));
}

// =============================================================================
// Dictionary Management
// =============================================================================

#[test]
fn dict_add_then_stats() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["dict", "add", "french", "idiot", "--severity", "severe"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(dir.path().join("toxic_words/french.txt")).unwrap(),
        "idiot,3\n"
    );

    let json = json_of(&dir, &["dict", "stats"]);
    assert_eq!(json["words"], 2);
    assert_eq!(json["phrases"], 1);
    assert_eq!(json["stopwords"], 2);
}

#[test]
fn dict_add_rejects_duplicate() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["dict", "add", "english", "BAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in the dictionary"));
}

// =============================================================================
// Usage errors
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help prints help to stderr and exits 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_command_or_flag_is_rejected() {
    for arg in ["scan", "--strict"] {
        cmd()
            .arg(arg)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

#[test]
fn unknown_sort_algorithm_is_rejected() {
    let dir = fixture();
    in_fixture(&dir)
        .args(["words", "sample.txt", "--algorithm", "heap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("heap"));
}

#[test]
fn chdir_to_missing_directory_fails() {
    cmd()
        .args(["-C", "/nonexistent/corpus/dir", "analyze", "sample.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}

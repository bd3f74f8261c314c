use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const CATALOG: &str = "Career,Description
Data Scientist,analyze data build models
Chef,cook food in a kitchen
Nurse,care for patients in a hospital
";

/// Working directory holding `careers.csv`
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("careers.csv"), CATALOG).unwrap();
    dir
}

/// The binary run inside `dir`, isolated from the caller's environment
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("career-recommender").unwrap();
    cmd.current_dir(dir)
        .env_remove("CAREER_RECOMMENDER_CONFIG")
        .env_remove("CAREER_RECOMMENDER_CORPUS")
        .env_remove("CAREER_RECOMMENDER_TOP_K")
        .env_remove("CAREER_RECOMMENDER_PARALLEL_THRESHOLD")
        .env_remove("RUST_LOG");
    cmd
}

fn listed(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| line.strip_prefix("- ").map(str::to_owned))
        .collect()
}

#[test]
fn test_cli_help() {
    let dir = workspace();
    cli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_recommend_lists_best_matches() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend", "-k", "2"])
        .args(["I", "love", "analyzing", "data", "and", "building", "models"])
        .assert()
        .success()
        .stdout("Based on your input, we recommend the following careers:\n- Data Scientist\n- Chef\n");
}

#[test]
fn test_recommend_reads_stdin_without_text() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend", "--top-k", "1"])
        .write_stdin("I want to care for patients\n")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("- Nurse\n"));
}

#[test]
fn test_empty_input_warns_instead_of_ranking() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend"])
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please describe your interests and skills"))
        .stdout(predicate::str::contains("- ").not());
}

#[test]
fn test_unmatched_words_print_notice_and_catalog_order() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend", "-k", "3", "xylophone", "quasar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("None of the careers matched your description"))
        .stdout(predicate::str::contains("- Data Scientist\n- Chef\n- Nurse\n"));
}

#[test]
fn test_scores_flag_prints_ranked_scores() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend", "--scores", "-k", "1"])
        .arg("care for patients in a hospital")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Nurse (1.0000)"));
}

#[test]
fn test_top_k_flag_overrides_config_file() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("career-recommender.toml"),
        "[corpus]\npath = \"careers.csv\"\n\n[ranking]\ntop_k = 1\n",
    )
    .unwrap();

    let from_config = cli(dir.path()).args(["recommend", "cook food"]).output().unwrap();
    assert!(from_config.status.success());
    assert_eq!(listed(&from_config.stdout), vec!["Chef"]);

    let from_flag = cli(dir.path())
        .args(["recommend", "--top-k", "3", "cook food"])
        .output()
        .unwrap();
    assert!(from_flag.status.success());
    assert_eq!(listed(&from_flag.stdout).len(), 3);
}

#[test]
fn test_env_top_k_overrides_default() {
    let dir = workspace();
    let output = cli(dir.path())
        .env("CAREER_RECOMMENDER_TOP_K", "2")
        .env("CAREER_RECOMMENDER_CORPUS", "careers.csv")
        .args(["recommend", "cook food"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(listed(&output.stdout), vec!["Chef", "Data Scientist"]);
}

#[test]
fn test_zero_top_k_is_rejected_by_parser() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "recommend", "-k", "0", "cook"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_corpus_exits_with_data_error() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "missing.csv", "recommend", "cook"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn test_empty_corpus_exits_with_data_error() {
    let dir = workspace();
    std::fs::write(dir.path().join("empty.csv"), "Career,Description\n").unwrap();
    cli(dir.path())
        .args(["--corpus", "empty.csv", "recommend", "cook"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corpus is empty"));
}

#[test]
fn test_malformed_config_exits_with_config_error() {
    let dir = workspace();
    std::fs::write(dir.path().join("bad.toml"), "[ranking\ntop_k = ").unwrap();
    cli(dir.path())
        .args(["--config", "bad.toml", "--corpus", "careers.csv", "recommend", "cook"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_env_value_exits_with_config_error() {
    let dir = workspace();
    cli(dir.path())
        .env("CAREER_RECOMMENDER_TOP_K", "zero")
        .args(["--corpus", "careers.csv", "recommend", "cook"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("CAREER_RECOMMENDER_TOP_K"));
}

#[test]
fn test_inspect_summarizes_catalog() {
    let dir = workspace();
    cli(dir.path())
        .args(["--corpus", "careers.csv", "inspect", "--terms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("careers:     3"))
        .stdout(predicate::str::contains("vocabulary:  10"))
        .stdout(predicate::str::contains("empty rows:  0"))
        .stdout(predicate::str::contains("  analyze"))
        .stdout(predicate::str::contains("  build").not());
}

#[test]
fn test_interactive_answers_each_line() {
    let dir = workspace();
    let output = cli(dir.path())
        .args(["--corpus", "careers.csv", "interactive", "-k", "1"])
        .write_stdin("cook food\n\ncare for patients\nxylophone\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(listed(&output.stdout), vec!["Chef", "Nurse", "Data Scientist"]);
    assert!(stdout.contains("Please describe your interests and skills"));
    assert!(stdout.contains("None of the careers matched"));
}

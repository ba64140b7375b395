//! Integration tests for tfind

mod harness;

use assert_cmd::Command;
use harness::{TestDir, run_tfind, sorted_paths};
use predicates::prelude::*;

fn scenario() -> TestDir {
    let dir = TestDir::new();
    dir.add_file("a/target.txt");
    dir.add_file("a/b/target.txt");
    dir.add_file("a/b/c/other.txt");
    dir
}

#[test]
fn test_finds_all_matches() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &["target.txt"]);
    assert!(out.success(), "stderr: {}", out.stderr);
    assert_eq!(
        out.sorted_lines(),
        sorted_paths(&[dir.join("a/target.txt"), dir.join("a/b/target.txt")])
    );
    assert!(out.stderr.contains("found 2 file(s)"), "{}", out.stderr);
}

#[test]
fn test_same_result_for_one_and_many_threads() {
    let dir = scenario();
    let sequential = run_tfind(dir.path(), &["--num-threads", "1", "target.txt"]);
    let parallel = run_tfind(dir.path(), &["--num-threads", "10", "target.txt"]);
    assert!(sequential.success() && parallel.success());
    assert_eq!(sequential.sorted_lines(), parallel.sorted_lines());
    assert_eq!(sequential.sorted_lines().len(), 2);
}

#[test]
fn test_accepts_underscore_flag_spelling() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &["--num_threads", "3", "other.txt"]);
    assert!(out.success(), "stderr: {}", out.stderr);
    assert_eq!(
        out.sorted_lines(),
        sorted_paths(&[dir.join("a/b/c/other.txt")])
    );
}

#[test]
fn test_no_matches() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &["missing.txt"]);
    assert!(out.success());
    assert!(out.stdout.trim().is_empty());
    assert!(out.stderr.contains("found 0 file(s)"));
}

#[test]
fn test_thread_count_out_of_range() {
    let dir = scenario();
    for bad in ["0", "201", "1000"] {
        let out = run_tfind(dir.path(), &["--num-threads", bad, "target.txt"]);
        assert_eq!(out.code, Some(1), "value {bad}");
        assert!(
            out.stderr.contains("number of threads must be inside [1; 200]"),
            "{}",
            out.stderr
        );
        assert!(out.stdout.is_empty());
    }
}

#[test]
fn test_thread_count_bounds_are_inclusive() {
    let dir = scenario();
    for ok in ["1", "200"] {
        let out = run_tfind(dir.path(), &["--num-threads", ok, "target.txt"]);
        assert!(out.success(), "value {ok}: {}", out.stderr);
    }
}

#[test]
fn test_missing_filename_is_usage_error() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &[]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("tfind:"));
}

#[test]
fn test_non_numeric_thread_count_is_usage_error() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &["--num-threads", "many", "target.txt"]);
    assert_eq!(out.code, Some(1));
}

#[test]
fn test_missing_root() {
    let dir = TestDir::new();
    let missing = dir.join("nope");
    let out = run_tfind(&missing, &["x"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("cannot access"), "{}", out.stderr);
}

#[test]
fn test_json_output() {
    let dir = scenario();
    let out = run_tfind(dir.path(), &["--json", "--sort", "target.txt"]);
    assert!(out.success());
    let parsed: Vec<String> = serde_json::from_str(&out.stdout).expect("valid JSON");
    assert_eq!(
        parsed,
        sorted_paths(&[dir.join("a/target.txt"), dir.join("a/b/target.txt")])
    );
}

#[test]
fn test_sorted_output() {
    let dir = TestDir::new();
    for name in ["z", "m", "a"] {
        dir.add_file(&format!("{name}/hit"));
    }
    let out = run_tfind(dir.path(), &["--sort", "hit"]);
    let lines: Vec<&str> = out.stdout.lines().collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_tree_listing() {
    let dir = TestDir::new();
    dir.add_file("src/main.rs");
    dir.add_file(".git/HEAD");
    dir.add_file("README.md");

    let out = run_tfind(dir.path(), &["--tree"]);
    assert!(out.success(), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("main.rs"));
    assert!(out.stdout.contains("README.md"));
    assert!(!out.stdout.contains("HEAD"), "hidden dirs are not listed");
    assert!(out.stdout.contains(&format!("{}/:", dir.join("src").display())));
}

#[test]
fn test_help_and_version() {
    Command::cargo_bin("tfind")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--num-threads"));

    Command::cargo_bin("tfind")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tfind"));
}

#[test]
fn test_verbose_logs_search_stats() {
    let dir = scenario();
    Command::cargo_bin("tfind")
        .unwrap()
        .args(["-v", "--path"])
        .arg(dir.path())
        .arg("target.txt")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("tasks spawned"))
        .stderr(predicate::str::contains("found 2 file(s)"));
}

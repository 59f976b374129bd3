//! CLI integration tests for sift commands.
//!
//! These tests focus on exit codes and the content of the output, not its
//! exact layout, which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sift command.
fn sift() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sift").unwrap()
}

/// Helper to run `sift` with HOME isolated to the provided directory.
fn sift_with_home(home: &Path) -> Command {
    let mut cmd = sift();
    cmd.env("HOME", home).env_remove("SIFT_LOG");
    cmd
}

/// Runs `sift` in a fresh directory with an empty, isolated HOME.
fn sift_isolated() -> (Command, tempfile::TempDir) {
    let dir = temp_dir();
    let mut cmd = sift_with_home(dir.path());
    cmd.current_dir(dir.path());
    (cmd, dir)
}

/// Parses stdout as JSON.
fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["parse", "foo -bar (baz or qux)"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Query(\"foo -bar (baz or qux)\")"))
            .stdout(predicate::str::contains("Phrase(exclude, \"bar\")"))
            .stdout(predicate::str::contains("Group(default)"))
            .stdout(predicate::str::contains("Phrase(or, \"qux\")"));
    }

    #[test]
    fn json_output() {
        let (mut cmd, _dir) = sift_isolated();
        let assert = cmd.args(["parse", "--json", "a \"b c\""]).assert().success();
        let value = stdout_json(&assert.get_output().stdout);

        assert_eq!(value["original_query"], "a \"b c\"");
        assert_eq!(value["phrases"][1]["text"], "b c");
        assert_eq!(value["phrases"][1]["is_multi_word"], true);
        assert_eq!(value["children"], json!([]));
    }

    #[test]
    fn warns_on_query_without_words() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["parse", "--", "-only"])
            .assert()
            .success()
            .stderr(predicate::str::contains("no searchable words"));
    }

    #[test]
    fn repairs_unbalanced_input() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["parse", "(unclosed \"quote"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Phrase(default, \"quote\")"));
    }

    #[test]
    fn config_selects_json_format() {
        let (mut cmd, dir) = sift_isolated();
        fs::write(
            dir.path().join(".sift.toml"),
            "root = true\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let assert = cmd.args(["parse", "x"]).assert().success();
        let value = stdout_json(&assert.get_output().stdout);
        assert_eq!(value["phrases"][0]["text"], "x");
    }

    #[test]
    fn fails_on_invalid_config() {
        let (mut cmd, dir) = sift_isolated();
        fs::write(dir.path().join(".sift.toml"), "[query\n").unwrap();

        cmd.args(["parse", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod words {
    use super::*;

    #[test]
    fn one_per_line() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["words", "a \"b c\" -d (e or f)"])
            .assert()
            .success()
            .stdout("a\nb\nc\ne\nf\n");
    }

    #[test]
    fn json_with_excluded() {
        let (mut cmd, _dir) = sift_isolated();
        let assert = cmd
            .args(["words", "--json", "--excluded", "a -b (-c d)"])
            .assert()
            .success();
        let value = stdout_json(&assert.get_output().stdout);

        assert_eq!(value["words"], json!(["a", "d"]));
        assert_eq!(value["excluded"], json!(["b", "c"]));
    }

    #[test]
    fn json_omits_excluded_by_default() {
        let (mut cmd, _dir) = sift_isolated();
        let assert = cmd.args(["words", "--json", "a"]).assert().success();
        let value = stdout_json(&assert.get_output().stdout);

        assert!(value.get("excluded").is_none());
    }

    #[test]
    fn single_quotes_flag() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["words", "--single-quotes", "'abc"])
            .assert()
            .success()
            .stdout("'abc'\n");
    }

    #[test]
    fn single_quotes_from_config() {
        let (mut cmd, dir) = sift_isolated();
        fs::write(
            dir.path().join(".sift.toml"),
            "root = true\n[query]\nbalance_single_quotes = true\n",
        )
        .unwrap();

        cmd.args(["words", "'abc"]).assert().success().stdout("'abc'\n");
    }
}

mod tokens {
    use super::*;

    #[test]
    fn prints_table() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["tokens", "a OR b"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Kind"))
            .stdout(predicate::str::contains("\"OR\""))
            .stdout(predicate::str::contains("or"));
    }

    #[test]
    fn balanced_shows_repaired_query() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["tokens", "--balanced", "a)"])
            .assert()
            .success()
            .stdout(predicate::str::contains("balanced: (a)"))
            .stdout(predicate::str::contains("repaired: yes"));
    }

    #[test]
    fn json_output() {
        let (mut cmd, _dir) = sift_isolated();
        let assert = cmd
            .args(["tokens", "--json", "--balanced", "(a"])
            .assert()
            .success();
        let value = stdout_json(&assert.get_output().stdout);

        assert_eq!(value["balanced"], "(a)");
        assert_eq!(
            value["tokens"],
            json!([
                {"kind": "brace_open", "text": "("},
                {"kind": "string", "text": "a"},
                {"kind": "brace_close", "text": ")"},
            ])
        );
    }
}

mod check {
    use super::*;

    #[test]
    fn succeeds_when_all_valid() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["check", "a", "b -c"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ok"));
    }

    #[test]
    fn fails_when_any_invalid() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["check", "--", "a", "-b", "\"\""])
            .assert()
            .failure()
            .stdout(predicate::str::contains("invalid \"-b\""))
            .stdout(predicate::str::contains("no search to perform"));
    }

    #[test]
    fn quiet_prints_nothing() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["check", "--quiet", "--", "-x"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let dir = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [query]"));
        assert!(contents.contains("# root = false"));
    }

    #[test]
    fn fails_if_config_exists() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "existing").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_existing_even_if_invalid() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "not [valid toml").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [output]"));
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let dir = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--global"])
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# color = true"));
        assert!(!dir.path().join(".sift.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults_without_config() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("no config files found"))
            .stdout(predicate::str::contains("config root").not())
            .stdout(predicate::str::contains("balance_single_quotes = false"))
            .stdout(predicate::str::contains("format = \"tree\""));
    }

    #[test]
    fn shows_merged_settings() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(home.path().join(".sift.toml"), "[output]\ncolor = false\n").unwrap();
        fs::write(dir.path().join(".sift.toml"), "[output]\nformat = \"json\"\n").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("format = \"json\""))
            .stdout(predicate::str::contains("color = false"));
    }

    #[test]
    fn shows_nearest_config_directory_as_root() {
        let (mut cmd, dir) = sift_isolated();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let sub = fs::canonicalize(sub).unwrap();
        fs::write(dir.path().join(".sift.toml"), "root = true\n").unwrap();
        fs::write(sub.join(".sift.toml"), "[query]\nbalance_single_quotes = true\n").unwrap();

        let expected = format!("# config root: {}", sub.display());
        cmd.current_dir(&sub)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains(expected))
            .stdout(predicate::str::contains("balance_single_quotes = true"));
    }
}

mod logging {
    use super::*;

    #[test]
    fn verbose_logs_to_stderr() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["-vv", "words", "a"])
            .assert()
            .success()
            .stdout("a\n")
            .stderr(predicate::str::contains("parsed query"));
    }

    #[test]
    fn quiet_by_default() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.args(["words", "a"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn env_filter_overrides_verbosity() {
        let (mut cmd, _dir) = sift_isolated();
        cmd.env("SIFT_LOG", "sift_query=debug")
            .args(["words", "a"])
            .assert()
            .success()
            .stderr(predicate::str::contains("parsed query"));
    }
}

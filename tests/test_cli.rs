//! Tests of the installed binary surface.

mod common;

use assert_cmd::Command;
use common::{make_enclosing, make_remote};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_repo_list_file_fails() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("grove")
        .unwrap()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read repo-list file"));
}

#[test]
fn test_help_mentions_repo_list() {
    Command::cargo_bin("grove")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("repo-list"));
}

#[test]
fn test_apply_from_inside_repository() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();

    let host_remote = make_remote(&root, "host", &[]);
    let projr_remote = make_remote(&root, "projr", &[]);
    let host = make_enclosing(&root, &host_remote, "host");

    fs::write(
        host.join("repos.txt"),
        format!("file://{}\n", projr_remote.display()),
    )
    .unwrap();

    Command::cargo_bin("grove")
        .unwrap()
        .current_dir(&host)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 action(s) taken"));

    assert!(root.join("work").join("projr").is_dir());
}

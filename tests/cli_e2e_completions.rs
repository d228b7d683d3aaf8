//! End-to-end tests for the `theme-manifest completions` command.
//!
//! These tests verify the CLI behavior of the `completions` command by invoking
//! the binary directly and checking its output.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("theme-manifest");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate shell completion scripts",
        ))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("powershell"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("theme-manifest");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_theme-manifest()"))
        .stdout(predicate::str::contains("count"))
        .stdout(predicate::str::contains("upstream-merge"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("theme-manifest");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef theme-manifest"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_completions_fish() {
    let mut cmd = cargo_bin_cmd!("theme-manifest");
    cmd.arg("completions")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c theme-manifest"));
}

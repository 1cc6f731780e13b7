#![allow(deprecated)]

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("gh-explorer").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_subcommand_help() {
    let mut cmd = Command::cargo_bin("gh-explorer").unwrap();
    cmd.args(["trending", "--help"]);
    cmd.assert().success();
}

#[test]
fn test_cli_rejects_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("gh-explorer").unwrap();
    cmd.arg("frobnicate");
    cmd.assert().failure();
}

#[test]
fn test_cli_readme_requires_arguments() {
    let mut cmd = Command::cargo_bin("gh-explorer").unwrap();
    cmd.arg("readme");
    cmd.assert().failure();
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and the binary.
//!
//! Tests the CLI module with realistic command-line argument patterns, then
//! runs the offline subcommands of the built binary.

use clap::Parser;
use std::process::Command as StdCommand;
use upm_git::cli::{Cli, Command};

fn bin() -> StdCommand {
    let dir = std::env::temp_dir();
    let mut cmd = StdCommand::new(env!("CARGO_BIN_EXE_upm-git"));
    cmd.current_dir(dir)
        .env_remove("UPMGIT_GIT__EXECUTABLE")
        .env_remove("UPMGIT_PATHS__PROJECT");
    cmd
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["upm-git", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["upm-git"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_resolve_with_ref() {
    let cli = Cli::try_parse_from([
        "upm-git",
        "resolve",
        "git@github.com:XRTK/GitPackageTest.git",
        "-r",
        "1.0.0",
    ])
    .unwrap();
    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(args.remote, "git@github.com:XRTK/GitPackageTest.git");
    assert_eq!(args.reference, "1.0.0");
}

#[test]
fn cli_add_requires_remote() {
    assert!(Cli::try_parse_from(["upm-git", "add"]).is_err());
}

#[test]
fn cli_update_defaults_to_default_branch() {
    let cli = Cli::try_parse_from(["upm-git", "update", "com.pkg@https://host/o/r.git"]).unwrap();
    let Some(Command::Update(args)) = cli.command else {
        panic!("expected update command");
    };
    assert_eq!(args.package_id, "com.pkg@https://host/o/r.git");
    assert_eq!(args.reference, "");
}

#[test]
fn cli_unknown_command() {
    assert!(Cli::try_parse_from(["upm-git", "build"]).is_err());
}

#[test]
fn cli_file_log_level_falls_back_to_log_level() {
    let cli = Cli::try_parse_from(["upm-git", "-l", "2", "options"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    let file_level = overrides
        .iter()
        .find(|(key, _)| *key == "global.file_log_level")
        .map(|(_, value)| value.clone().into_int().unwrap());
    assert_eq!(file_level, Some(2));
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn bin_version() {
    let output = bin().arg("version").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn bin_without_command_fails() {
    let output = bin().output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn bin_info_prints_repository_fields() {
    let output = bin()
        .args(["-l", "0", "info", "com.pkg@git@github.com:o/r.git#2.0.0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("http_url = https://github.com/o/r"));
    assert!(stdout.contains("ref      = 2.0.0"));
}

#[test]
fn bin_options_applies_set_and_git_flags() {
    let output = bin()
        .args(["-l", "0", "-s", "poll.interval_ms=250", "--git", "git-custom", "options"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("git-custom"), "{stdout}");
    assert!(stdout.contains("250"), "{stdout}");
    assert!(stdout.contains("[override] poll.interval_ms"), "{stdout}");
}

#[test]
fn bin_options_lists_effective_values() {
    let project = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["-l", "0", "-p"])
        .arg(project.path())
        .arg("options")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("git.executable"));
    assert!(stdout.contains(&project.path().display().to_string()));
}

#[test]
fn bin_rejects_blank_remote() {
    let output = bin().args(["-l", "0", "refs", "   "]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unresolved remote"));
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::ConfigSource;
use super::{Config, ConfigLoader, PathsConfig};
use crate::config::types::GitConfig;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.git.executable, "git");
    assert_eq!(config.git.timeout(), None);
    assert!(config.git.disable_prompts);
    assert_eq!(config.poll.interval(), Duration::from_millis(100));
    assert_eq!(config.hosts.entries().len(), 3);
}

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
}

#[test]
fn test_paths_resolve_against_project() {
    let paths = PathsConfig {
        project: PathBuf::from("/work/game"),
        ..Default::default()
    };

    let normalize = |p: PathBuf| p.to_string_lossy().replace('\\', "/");
    assert_eq!(normalize(paths.scratch_dir()), "/work/game/Temp/UpmGit");
    assert_eq!(
        normalize(paths.manifest_path()),
        "/work/game/Packages/manifest.json"
    );
}

#[test]
fn test_paths_absolute_override() {
    let absolute = std::env::temp_dir().join("upm-scratch");
    let paths = PathsConfig {
        project: PathBuf::from("/work/game"),
        scratch: absolute.clone(),
        ..Default::default()
    };

    assert_eq!(paths.scratch_dir(), absolute);
}

#[test]
fn test_git_env_vars() {
    let git = GitConfig::default();
    assert_eq!(
        git.env_vars(),
        [("GIT_TERMINAL_PROMPT", "0"), ("GCM_INTERACTIVE", "never")]
    );

    let git = GitConfig {
        disable_prompts: false,
        ..Default::default()
    };
    assert!(git.env_vars().is_empty());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4

[git]
executable = "/usr/local/bin/git"
timeout_secs = 30

[paths]
project = "/work/game"

[poll]
interval_ms = 25
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.git.executable, "/usr/local/bin/git");
    assert_eq!(config.git.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.paths.project, Path::new("/work/game"));
    assert_eq!(config.poll.interval_ms, 25);
}

#[test]
fn test_config_hosts_replace_defaults() {
    let toml = r#"
[[hosts]]
name = "Gitea"
domain = "git.example.org"
blob = "src/commit"
"#;

    let config = Config::parse(toml).unwrap();
    let entries = config.hosts.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Gitea");
    assert_eq!(entries[0].logo_light, "");
    assert_eq!(
        config.hosts.host_data("pkg@https://git.example.org/o/r.git").blob,
        "src/commit"
    );
}

#[test]
fn test_zero_poll_interval_rejected() {
    let err = Config::parse("[poll]\ninterval_ms = 0").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'interval_ms' in section '[poll]': must be greater than zero"
    );
}

#[test]
fn test_empty_executable_rejected() {
    let err = Config::parse("[git]\nexecutable = \"\"").unwrap_err();
    assert!(err.to_string().contains("executable"));
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[unknown_section]\nfoo = \"bar\"");
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_in_section() {
    let result = Config::parse("[git]\nexe = \"git\"");
    assert!(result.is_err());
}

#[test]
fn test_config_builder_set_override() {
    let config = Config::builder()
        .add_toml_str("[global]\noutput_log_level = 2")
        .set("global.output_log_level", 5)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[poll]\n interval_ms = 50")
        .add_toml_file_optional("/nonexistent/upm-git.toml");

    assert_eq!(loader.sources(), [ConfigSource::Inline]);
}

#[test]
fn test_config_loader_records_every_source() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .with_env_prefix("UPMGIT")
        .set("paths.project", "/work/game")
        .unwrap();

    let sources: Vec<String> = loader.sources().iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(sources.join("\n"), @r"
    [string] <string>
    [env] UPMGIT_*
    [override] paths.project
    ");
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse("[git]\ntimeout_secs = 10").unwrap();

    let first = config.format_options();
    assert_eq!(first, config.format_options());

    let keys: Vec<&str> = first
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    assert!(first.iter().any(|line| line.ends_with("= 10") && line.starts_with("git.timeout_secs")));
    assert!(first.iter().any(|line| line.starts_with("hosts.0") && line.contains("GitHub")));
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options shared by every subcommand.
//!
//! ```text
//! -c/--config FILE       extra TOML layer (repeatable, later wins)
//! -s/--set KEY=VALUE     any dotted key, e.g. git.timeout_secs=30
//! -l/--log-level N       console verbosity 0-6
//!    --file-log-level N  file verbosity, defaults to --log-level
//!    --log-file FILE     global.log_file
//!    --git PATH          git.executable
//! -p/--project DIR       paths.project
//! ```
//!
//! Dedicated flags are applied after `--set`, so `-l 4 -s global.output_log_level=1`
//! logs at 4.

use clap::Args;
use std::path::PathBuf;

/// Splits `KEY=VALUE` at the first `=`; the key must be non-empty.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML configuration file. Repeatable.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Sets one configuration key, e.g. `poll.interval_ms=50`. Repeatable.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment, action = clap::ArgAction::Append)]
    pub assignments: Vec<(String, String)>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=git commands, 5=git output, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub log_level: Option<u8>,

    /// Log file level; defaults to --log-level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub file_log_level: Option<u8>,

    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Git executable name or path.
    #[arg(long = "git", value_name = "PATH")]
    pub git: Option<String>,

    /// Project root containing Packages/manifest.json.
    #[arg(short = 'p', long = "project", value_name = "DIR")]
    pub project: Option<PathBuf>,
}

impl GlobalOptions {
    /// Overrides in application order: `--set` first, then dedicated flags.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, config::Value)> {
        let levels = [
            ("global.output_log_level", self.log_level),
            ("global.file_log_level", self.file_log_level.or(self.log_level)),
        ];
        let paths = [
            ("global.log_file", self.log_file.as_ref()),
            ("paths.project", self.project.as_ref()),
        ];

        self.assignments
            .iter()
            .map(|(key, value)| (key.clone(), config::Value::from(value.as_str())))
            .chain(
                levels
                    .into_iter()
                    .filter_map(|(key, level)| Some((key.to_string(), i64::from(level?).into()))),
            )
            .chain(
                paths
                    .into_iter()
                    .filter_map(|(key, path)| Some((key.to_string(), path?.display().to_string().into()))),
            )
            .chain(
                self.git
                    .as_ref()
                    .map(|git| ("git.executable".to_string(), git.as_str().into())),
            )
            .collect()
    }
}

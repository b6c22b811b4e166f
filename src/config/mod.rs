// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for upm-git.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. upm-git.toml (cwd)
//! 3. --config (in order given)
//! 4. UPMGIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! UPMGIT_GIT__EXECUTABLE=/usr/bin/git  → git.executable = "/usr/bin/git"
//! UPMGIT_POLL__INTERVAL_MS=50          → poll.interval_ms = 50
//! UPMGIT_PATHS__PROJECT=/work/game     → paths.project = "/work/game"
//! ```
//!
//! # Host Entries
//!
//! ```toml
//! [[hosts]]
//! name = "Gitea"
//! domain = "git.example.org"
//! blob = "src/commit"
//! ```
//!
//! Listing `[[hosts]]` replaces the built-in GitHub/GitLab/Bitbucket entries.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::host::HostSettings;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GitConfig, GlobalConfig, PollConfig};

/// Local configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "upm-git.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "UPMGIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git executable settings.
    pub git: GitConfig,
    /// Project paths.
    pub paths: PathsConfig,
    /// Poll cadence.
    pub poll: PollConfig,
    /// Repository host display data.
    pub hosts: HostSettings,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use upm_git::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("upm-git.toml")
    ///     .with_env_prefix("UPMGIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty git executable, a
    /// zero timeout or a zero poll interval.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        self.poll.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One `key = value` line per option, keys sorted and aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_host_options(&mut options);
        options.insert(
            "poll.interval_ms".into(),
            self.poll.interval_ms.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.executable".into(), self.git.executable.clone());
        options.insert(
            "git.timeout_secs".into(),
            self.git
                .timeout_secs
                .map_or_else(String::new, |secs| secs.to_string()),
        );
        options.insert(
            "git.disable_prompts".into(),
            self.git.disable_prompts.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.project".into(),
            self.paths.project.display().to_string(),
        );
        options.insert(
            "paths.scratch".into(),
            self.paths.scratch_dir().display().to_string(),
        );
        options.insert(
            "paths.manifest".into(),
            self.paths.manifest_path().display().to_string(),
        );
    }

    fn format_host_options(&self, options: &mut BTreeMap<String, String>) {
        for (i, host) in self.hosts.entries().iter().enumerate() {
            options.insert(
                format!("hosts.{i}"),
                format!("{} ({}, {})", host.name, host.domain, host.blob),
            );
        }
    }
}

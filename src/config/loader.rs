// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("upm-git.toml")    [optional]
//!   .add_toml_file(--config)...                [file]
//!   .with_env_prefix("UPMGIT")                 [env]
//!   .set("paths.project", "/work/game")        [override]
//!        |
//!        v  later sources win
//!    build() --> Config --> Config::validate()
//! ```

use anyhow::Context;
use config::{Environment, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a layer of configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file that must exist.
    File(PathBuf),
    /// A file that existed when it was added.
    Optional(PathBuf),
    /// TOML text passed directly.
    Inline,
    /// Environment variables with this prefix.
    Environment(String),
    /// A single key set programmatically.
    Override(String),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
            Self::Environment(prefix) => write!(f, "[env] {prefix}_*"),
            Self::Override(key) => write!(f, "[override] {key}"),
        }
    }
}

/// Collects configuration sources in priority order.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file; `build()` fails if it is missing or malformed.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::File(path.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `{prefix}_SECTION__KEY` variables at `build()` time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.sources
            .push(ConfigSource::Environment(prefix.to_string()));
        self
    }

    /// Overrides one dotted key, above every other source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key cannot be set.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::InvalidValue {
                section: key.split('.').next().unwrap_or(key).to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;
        self.sources.push(ConfigSource::Override(key.to_string()));
        Ok(self)
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, TOML or an environment
    /// value does not parse, an unknown key is present, or
    /// [`Config::validate`] rejects a value.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder
            .build()
            .and_then(|merged| merged.try_deserialize::<Config>())
            .context("failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Sources in the order they were added, lowest priority first.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

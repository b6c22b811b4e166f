// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          UpmError (16 bytes)
//!                 |
//!   +--------+----+---+--------+
//!   |        |        |        |
//!   v        v        v        v
//!  Git    Process   Config    Host
//!  Box      Box      Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, InvalidRemote, NoRefs, ManifestMissing
//!   Process ExecutableNotFound, SpawnFailed, Busy, Timeout
//!   Config  ParseError, InvalidValue
//!   Host    RequestActive, InvalidSpecifier, ManifestIo
//! ```
//!
//! Malformed identity input never reaches this module: the identity
//! functions answer with an empty string instead.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`UpmError`].
pub type UpmResult<T> = std::result::Result<T, UpmError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum UpmError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Host package manager error.
    #[error("host error: {0}")]
    Host(#[from] Box<HostError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for UpmError {
                fn from(err: $error) -> Self {
                    UpmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    HostError => Host,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Remote specifier could not be resolved to a repository.
    #[error("unresolved remote: '{0}'")]
    InvalidRemote(String),

    /// No usable ref was found on the remote.
    #[error("no refs found for {url}")]
    NoRefs { url: String },

    /// The manifest could not be read from the checkout.
    #[error("no package manifest found for {url} at '{reference}'")]
    ManifestMissing { url: String, reference: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Another process is still running in the single-flight slot.
    #[error("cannot start '{command}': another process is still running")]
    Busy { command: String },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Host Errors ---

/// Host package manager errors raised at submission time.
///
/// Failures of a submitted request are not errors: they arrive as a terminal
/// [`crate::host::package::RequestStatus::Failure`].
#[derive(Debug, Error)]
pub enum HostError {
    /// An add request is already being polled.
    #[error("an add request for '{active}' is still in progress")]
    RequestActive { active: String },

    /// The package specifier could not be parsed.
    #[error("invalid package specifier: '{0}'")]
    InvalidSpecifier(String),

    /// The project manifest could not be read or written.
    #[error("project manifest '{path}': {message}")]
    ManifestIo { path: String, message: String },
}

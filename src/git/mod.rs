// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote git operations.
//!
//! ```text
//!              Git { runner, executable }
//!                 |                  |
//!                 v                  v
//!            list_refs()      fetch_manifest_name()
//!        ls-remote --refs -q    clone --depth=1 --branch <ref>
//!                 |               --single-branch <url> <scratch>
//!                 v                  |
//!           ReferenceSet             v
//!            |       |          ManifestOutcome
//!       RefGroups  select_ref()  Found{name} | Missing
//! ```
//!
//! Both operations share the runner's single-flight slot: a second call while
//! one is in flight fails with `ProcessError::Busy`. Arguments are passed as an
//! argument vector, never through a shell.

pub mod manifest;
pub mod refs;

#[cfg(test)]
mod tests;

pub use manifest::{ManifestOutcome, read_package_name};
pub use refs::{DEFAULT_REF, RefGroups, ReferenceSet, is_version_like, select_ref};

use crate::core::process::ProcessRunner;

/// Default executable name.
pub const GIT: &str = "git";

/// A git executable bound to a single-flight runner.
#[derive(Debug, Clone)]
pub struct Git {
    runner: ProcessRunner,
    executable: String,
}

impl Git {
    /// Uses `git` from PATH.
    #[must_use]
    pub fn new(runner: ProcessRunner) -> Self {
        Self {
            runner,
            executable: GIT.to_string(),
        }
    }

    /// Overrides the executable (name on PATH or absolute path).
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    #[must_use]
    pub const fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }
}

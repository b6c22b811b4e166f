// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project paths.
//!
//! ```text
//! project/
//!   Packages/manifest.json   (manifest)
//!   Temp/UpmGit/             (scratch clone, replaced on every fetch)
//! ```
//!
//! `scratch` and `manifest` are relative to `project` unless absolute.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-relative paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root.
    pub project: PathBuf,
    /// Scratch directory for manifest clones.
    pub scratch: PathBuf,
    /// Project manifest receiving added dependencies.
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project: PathBuf::from("."),
            scratch: PathBuf::from("Temp").join("UpmGit"),
            manifest: PathBuf::from("Packages").join("manifest.json"),
        }
    }
}

impl PathsConfig {
    fn in_project(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project.join(path)
        }
    }

    /// Scratch directory, resolved against the project.
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        self.in_project(&self.scratch)
    }

    /// Manifest path, resolved against the project.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.in_project(&self.manifest)
    }
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package manifest fetching from a shallow clone.
//!
//! ```text
//! remove <scratch>
//! git clone --depth=1 [--branch <ref>] --single-branch <url> <scratch>
//!     |
//!     v  (read even when the clone failed)
//! <scratch>/package.json + package.json.meta --> "name"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use super::Git;
use super::refs::DEFAULT_REF;
use crate::error::ProcessError;

/// Manifest file name inside a package.
pub const MANIFEST_FILE: &str = "package.json";

/// Sidecar that must sit next to the manifest for it to count.
pub const MANIFEST_META_FILE: &str = "package.json.meta";

/// What a manifest fetch found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// A valid manifest declared `name`.
    Found { name: String, clone_succeeded: bool },
    /// No valid manifest in the scratch checkout.
    Missing { clone_succeeded: bool },
}

impl ManifestOutcome {
    /// The package name, or "" when missing.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Found { name, .. } => name,
            Self::Missing { .. } => "",
        }
    }

    #[must_use]
    pub const fn clone_succeeded(&self) -> bool {
        match self {
            Self::Found {
                clone_succeeded, ..
            }
            | Self::Missing { clone_succeeded } => *clone_succeeded,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

#[derive(Deserialize)]
struct PackageManifest {
    #[serde(default)]
    name: String,
}

/// Reads `name` from `dir/package.json`.
///
/// Returns "" if the directory, the manifest or its `.meta` sidecar is absent,
/// or if the manifest is not valid JSON.
pub async fn read_package_name(dir: &Path) -> String {
    let manifest = dir.join(MANIFEST_FILE);
    if !tokio::fs::try_exists(dir.join(MANIFEST_META_FILE))
        .await
        .unwrap_or(false)
    {
        return String::new();
    }

    let content = match tokio::fs::read_to_string(&manifest).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return String::new(),
        Err(e) => {
            warn!(path = %manifest.display(), error = %e, "cannot read package manifest");
            return String::new();
        }
    };
    match serde_json::from_str::<PackageManifest>(&content) {
        Ok(parsed) => parsed.name,
        Err(e) => {
            warn!(path = %manifest.display(), error = %e, "invalid package manifest");
            String::new()
        }
    }
}

/// Clone arguments; `HEAD` and "" clone the default branch.
pub(super) fn clone_args(url: &str, reference: &str, scratch: &Path) -> Vec<String> {
    let mut args = vec!["clone".to_string(), "--depth=1".to_string()];
    if !reference.is_empty() && reference != DEFAULT_REF {
        args.push("--branch".to_string());
        args.push(reference.to_string());
    }
    args.push("--single-branch".to_string());
    args.push(url.to_string());
    args.push(scratch.to_string_lossy().into_owned());
    args
}

async fn clear_scratch(scratch: &Path) {
    match tokio::fs::remove_dir_all(scratch).await {
        Ok(()) => debug!(path = %scratch.display(), "removed stale scratch checkout"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %scratch.display(), error = %e, "cannot remove scratch checkout"),
    }
}

impl Git {
    /// Shallow-clones `url` at `reference` into `scratch` and reads the
    /// package name.
    ///
    /// The runner slot is claimed before any previous checkout in `scratch` is
    /// deleted, so a rejected call leaves the directory alone. The manifest is
    /// read even when the clone exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Busy` if the runner is occupied.
    pub async fn fetch_manifest_name(
        &self,
        url: &str,
        reference: &str,
        scratch: &Path,
    ) -> Result<ManifestOutcome, ProcessError> {
        let claim = self
            .runner()
            .claim(self.executable(), clone_args(url, reference, scratch))?;

        clear_scratch(scratch).await;
        if let Some(parent) = scratch.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!(path = %parent.display(), error = %e, "cannot create scratch parent");
        }

        let clone_succeeded = claim.launch().await.success();

        let name = read_package_name(scratch).await;
        let outcome = if name.is_empty() {
            ManifestOutcome::Missing { clone_succeeded }
        } else {
            ManifestOutcome::Found {
                name,
                clone_succeeded,
            }
        };

        match &outcome {
            ManifestOutcome::Found {
                name,
                clone_succeeded: false,
            } => warn!(url = %url, reference = %reference, name = %name,
                "clone exited with an error, manifest read anyway"),
            ManifestOutcome::Missing {
                clone_succeeded: true,
            } => warn!(url = %url, reference = %reference, "no package manifest in repository"),
            ManifestOutcome::Missing {
                clone_succeeded: false,
            } => warn!(url = %url, reference = %reference, "clone failed, no package manifest"),
            ManifestOutcome::Found { name, .. } => {
                debug!(url = %url, reference = %reference, name = %name, "package manifest found");
            }
        }
        Ok(outcome)
    }
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project-manifest package host.
//!
//! ```text
//! submit_add("name@remote#ref")
//!   parse --> InvalidSpecifier (rejected at submission)
//!   watch channel (InProgress)
//!   tokio::spawn
//!     read Packages/manifest.json (missing --> {})
//!     dependencies[name] = "remote#ref"
//!     write back
//!     send Success | Failure{message, code}
//!
//! poll_status(&handle) --> borrow() latest status, never waits
//! ```

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::debug;

use super::package::{HostErrorCode, PackageHost, RequestStatus};
use crate::error::HostError;
use crate::identity::PackageSpecifier;

/// Records git dependencies in a project manifest (`dependencies` object).
#[derive(Debug, Clone)]
pub struct ManifestHost {
    manifest_path: PathBuf,
}

/// Handle for one submitted add.
#[derive(Debug)]
pub struct ManifestRequest {
    status: watch::Receiver<RequestStatus>,
}

/// Why a manifest update failed.
struct Failure {
    code: HostErrorCode,
    message: String,
}

impl Failure {
    fn io(path: &Path, e: &std::io::Error) -> Self {
        let code = match e.kind() {
            std::io::ErrorKind::NotFound => HostErrorCode::NotFound,
            _ => HostErrorCode::Unknown,
        };
        Self {
            code,
            message: format!("{}: {e}", path.display()),
        }
    }

    fn conflict(path: &Path, message: impl fmt::Display) -> Self {
        Self {
            code: HostErrorCode::Conflict,
            message: format!("{}: {message}", path.display()),
        }
    }
}

impl ManifestHost {
    /// Creates a host writing to `manifest_path`.
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    /// Path of the project manifest.
    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Reads the recorded value for `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns `HostError::ManifestIo` if the manifest cannot be read or parsed.
    pub async fn dependency(&self, name: &str) -> Result<Option<String>, HostError> {
        let manifest_io = |message: String| HostError::ManifestIo {
            path: self.manifest_path.display().to_string(),
            message,
        };
        let content = match tokio::fs::read_to_string(&self.manifest_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(manifest_io(e.to_string())),
        };
        let manifest: Value =
            serde_json::from_str(&content).map_err(|e| manifest_io(e.to_string()))?;
        Ok(manifest
            .get("dependencies")
            .and_then(|deps| deps.get(name))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

impl PackageHost for ManifestHost {
    type Handle = ManifestRequest;

    fn submit_add(&self, package_id: &str) -> Result<Self::Handle, HostError> {
        let specifier: PackageSpecifier = package_id.parse()?;

        let (tx, rx) = watch::channel(RequestStatus::InProgress);
        let path = self.manifest_path.clone();
        tokio::spawn(async move {
            let status = match record_dependency(&path, &specifier).await {
                Ok(()) => RequestStatus::Success,
                Err(failure) => RequestStatus::Failure {
                    message: failure.message,
                    code: failure.code,
                },
            };
            let _ = tx.send(status);
        });

        Ok(ManifestRequest { status: rx })
    }

    fn poll_status(&self, handle: &Self::Handle) -> RequestStatus {
        handle.status.borrow().clone()
    }
}

/// Writes `dependencies[name] = remote#ref`, keeping every other key.
async fn record_dependency(path: &Path, specifier: &PackageSpecifier) -> Result<(), Failure> {
    let mut manifest = match tokio::fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Value::Object(Map::new()),
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| Failure::conflict(path, format!("invalid JSON: {e}")))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Value::Object(Map::new()),
        Err(e) => return Err(Failure::io(path, &e)),
    };

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| Failure::conflict(path, "manifest root is not an object"))?;
    let dependencies = root
        .entry("dependencies")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| Failure::conflict(path, "'dependencies' is not an object"))?;
    dependencies.insert(
        specifier.name().to_string(),
        Value::String(specifier.dependency_value()),
    );

    let mut rendered = serde_json::to_string_pretty(&manifest)
        .map_err(|e| Failure::conflict(path, format!("cannot render manifest: {e}")))?;
    rendered.push('\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Failure::io(parent, &e))?;
    }
    tokio::fs::write(path, rendered)
        .await
        .map_err(|e| Failure::io(path, &e))?;

    debug!(
        manifest = %path.display(),
        package = %specifier.name(),
        value = %specifier.dependency_value(),
        "dependency recorded"
    );
    Ok(())
}

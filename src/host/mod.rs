// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host collaborators.
//!
//! ```text
//! HostSettings::host_data(id)   domain --> display name, blob segment, icons
//!                               (fallback: generic "web" entry)
//!
//! PackageHost (trait)           submit_add(specifier) --> Handle
//!   ManifestHost                poll_status(&Handle) --> RequestStatus
//!                               InProgress | Success | Failure{message, code}
//! ```

pub mod manifest;
pub mod package;
#[cfg(test)]
mod tests;

pub use manifest::{ManifestHost, ManifestRequest};
pub use package::{HostErrorCode, PackageHost, RequestStatus};

use serde::{Deserialize, Serialize};

/// Display metadata for a repository hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostData {
    /// Display name ("GitHub").
    pub name: String,
    /// Substring matched against a package specifier.
    pub domain: String,
    /// Path segment between repository URL and revision when browsing files.
    pub blob: String,
    /// Icon for light editor themes.
    #[serde(default)]
    pub logo_light: String,
    /// Icon for dark editor themes.
    #[serde(default)]
    pub logo_dark: String,
}

impl HostData {
    /// The generic entry used when no domain matches.
    #[must_use]
    pub fn web() -> Self {
        Self {
            name: "web".to_string(),
            domain: "undefined".to_string(),
            blob: "blob".to_string(),
            logo_light: "d_buildsettings.web.small".to_string(),
            logo_dark: "buildsettings.web.small".to_string(),
        }
    }

    fn known(name: &str, domain: &str, blob: &str, logo: &str) -> Self {
        Self {
            name: name.to_string(),
            domain: domain.to_string(),
            blob: blob.to_string(),
            logo_light: format!("{logo}-light"),
            logo_dark: format!("{logo}-dark"),
        }
    }
}

/// Ordered host-data registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostSettings {
    hosts: Vec<HostData>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            hosts: vec![
                HostData::known("GitHub", "github.com", "blob", "github"),
                HostData::known("GitLab", "gitlab.com", "-/blob", "gitlab"),
                HostData::known("Bitbucket", "bitbucket.org", "src", "bitbucket"),
            ],
        }
    }
}

impl HostSettings {
    /// Creates settings from explicit entries (first match wins).
    #[must_use]
    pub const fn new(hosts: Vec<HostData>) -> Self {
        Self { hosts }
    }

    /// Registered entries in lookup order.
    #[must_use]
    pub fn entries(&self) -> &[HostData] {
        &self.hosts
    }

    /// Returns the first entry whose domain occurs in `package_id`, or the
    /// generic web entry.
    #[must_use]
    pub fn host_data(&self, package_id: &str) -> HostData {
        self.hosts
            .iter()
            .find(|host| !host.domain.is_empty() && package_id.contains(&host.domain))
            .cloned()
            .unwrap_or_else(HostData::web)
    }
}

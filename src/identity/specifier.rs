// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed `name@remote#ref` package specifier.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `name@remote[#ref]`; the ref is everything after the first `#`.
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^@]+)@([^#]+)(?:#(.+))?$").expect("unable to compile package specifier regex")
});

/// An installable package at an optional ref.
///
/// Immutable: selecting another ref produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpecifier {
    name: String,
    remote: String,
    reference: Option<String>,
}

impl PackageSpecifier {
    /// Creates a specifier; an empty `reference` means the default branch.
    pub fn new(name: impl Into<String>, remote: impl Into<String>, reference: &str) -> Self {
        Self {
            name: name.into(),
            remote: remote.into(),
            reference: (!reference.is_empty()).then(|| reference.to_string()),
        }
    }

    /// Parses `name@remote[#ref]`. Returns `None` for malformed input.
    ///
    /// The whole fragment is kept, so `Display` reproduces the input even if
    /// the ref itself contains `#`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = SPECIFIER_RE.captures(value)?;
        let reference = caps.get(3).map_or("", |m| m.as_str());
        Some(Self::new(&caps[1], &caps[2], reference))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// The ref, or `None` for the default branch.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Returns a copy targeting `reference` ("" for the default branch).
    #[must_use]
    pub fn with_ref(&self, reference: &str) -> Self {
        Self::new(self.name.clone(), self.remote.clone(), reference)
    }

    /// The value a project manifest records for this package: `remote[#ref]`.
    #[must_use]
    pub fn dependency_value(&self) -> String {
        self.reference.as_ref().map_or_else(
            || self.remote.clone(),
            |reference| format!("{}#{reference}", self.remote),
        )
    }

    /// See [`super::repo_http_url`].
    #[must_use]
    pub fn http_url(&self) -> String {
        super::repo_http_url(&self.to_string())
    }

    /// See [`super::repo_id`].
    #[must_use]
    pub fn repo_id(&self) -> String {
        super::repo_id(&self.to_string())
    }
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.remote)?;
        if let Some(reference) = &self.reference {
            write!(f, "#{reference}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PackageSpecifier {
    type Err = crate::error::HostError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::HostError::InvalidSpecifier(s.to_string()))
    }
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote reference enumeration.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::Git;
use crate::error::ProcessError;

/// Branch or tag name in `ls-remote` output.
static REMOTE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)refs/(tags|heads)/(.*)$").expect("unable to compile remote ref regex")
});

static VERSION_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+.*$").expect("unable to compile version-like ref regex")
});

/// Ref used for the manifest clone when the selection is not a known ref.
pub const DEFAULT_REF: &str = "HEAD";

/// Ref names from one enumeration, in `ls-remote` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    refs: Vec<String>,
}

impl ReferenceSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { refs: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.refs.clear();
    }

    /// Appends every `refs/heads/*` and `refs/tags/*` name found in `output`.
    pub fn extend_from_ls_remote(&mut self, output: &str) {
        self.refs.extend(
            REMOTE_REF_RE
                .captures_iter(output)
                .map(|caps| caps[2].trim().to_string())
                .filter(|name| !name.is_empty()),
        );
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.refs.iter().any(|r| r == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.refs.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.refs
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}

/// Whether a ref looks like `MAJOR.MINOR...`.
#[must_use]
pub fn is_version_like(name: &str) -> bool {
    VERSION_LIKE_RE.is_match(name)
}

/// Display grouping of a [`ReferenceSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefGroups {
    /// Version-like names, descending.
    pub versions: Vec<String>,
    /// Everything else, descending.
    pub others: Vec<String>,
}

impl RefGroups {
    /// Versions first, then the rest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.versions
            .iter()
            .chain(&self.others)
            .map(String::as_str)
    }
}

impl From<&ReferenceSet> for RefGroups {
    fn from(refs: &ReferenceSet) -> Self {
        let (mut versions, mut others): (Vec<String>, Vec<String>) =
            refs.iter().map(str::to_string).partition(|r| is_version_like(r));
        versions.sort_unstable_by(|a, b| b.cmp(a));
        others.sort_unstable_by(|a, b| b.cmp(a));
        Self { versions, others }
    }
}

/// Returns `requested` if the remote has it, otherwise [`DEFAULT_REF`].
#[must_use]
pub fn select_ref<'a>(refs: &ReferenceSet, requested: &'a str) -> &'a str {
    if !requested.is_empty() && refs.contains(requested) {
        requested
    } else {
        DEFAULT_REF
    }
}

impl Git {
    /// Replaces `refs` with the branches and tags of `url`.
    ///
    /// `refs` is cleared before the invocation and stays empty when it fails.
    /// Returns whether `ls-remote` succeeded.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Busy` if the runner is occupied.
    pub async fn list_refs(&self, url: &str, refs: &mut ReferenceSet) -> Result<bool, ProcessError> {
        refs.clear();

        let outcome = self
            .runner()
            .run(self.executable(), ["ls-remote", "--refs", "-q", url])?
            .await;
        if !outcome.success() {
            warn!(url = %url, "could not list remote refs");
            return Ok(false);
        }

        refs.extend_from_ls_remote(outcome.stdout());
        debug!(url = %url, count = refs.len(), "listed remote refs");
        Ok(true)
    }
}

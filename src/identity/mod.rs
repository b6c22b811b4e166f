// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote and package specifier normalization.
//!
//! ```text
//! remote forms                     package specifier
//!   git@host:o/r(.git)               name@remote#ref
//!   ssh://git@host/o/r(.git)           |       |    |
//!   https://host/o/r(.git)             |       |    +-- ref_name()
//!                                      |       +------- repo_http_url() --> repo_id()
//! canonicalize_remote()                +--------------- specific_package_id()
//!   scp-like --> ssh://user@host/path
//!   always ends in .git              resolved path  .../name@<hash>
//!                                                     +-- revision_hash()
//! ```
//!
//! Every function here is pure. Malformed input yields an empty string, which
//! callers treat as "unresolved".

pub mod specifier;

pub use specifier::PackageSpecifier;

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use wax::Program as _;

use crate::host::HostSettings;

/// `user@host:path` without a scheme.
static SCP_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^@/:\s]+@[^:/\s]+):(.*)$").expect("unable to compile scp-like remote regex")
});

/// `name@remote[#ref]`, remote captured up to the first `#`.
static PACKAGE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@([^#]+)(#.+)?$").expect("unable to compile package id regex")
});

/// Fragment after the last `#` of a `name@remote#...` specifier.
static REF_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[^#]+#(?:.*#)?([^#]+)$").expect("unable to compile ref name regex")
});

/// `git@host:` or `git:git@host:` scp prefix.
static SCP_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(git:)?git@([^:]+):").expect("unable to compile scp prefix regex")
});

/// Trailing `owner/repo` path segments.
static REPO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/]+/[^/]+)$").expect("unable to compile repo id regex"));

/// Text after the final `@` of a resolved package path.
static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^@]+)$").expect("unable to compile revision regex"));

/// Specifier head (everything before the first `#`).
static SPECIFIER_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^#]+)(#.+)?$").expect("unable to compile specifier head regex")
});

/// Canonicalizes a remote so it can be handed to `git`.
///
/// A scheme-less `user@host:path` becomes `ssh://user@host/path`; every other
/// form passes through. The result always ends in `.git`. Idempotent.
/// Blank input returns an empty string.
#[must_use]
pub fn canonicalize_remote(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let remote = SCP_LIKE_RE.captures(raw).map_or_else(
        || raw.to_string(),
        |caps| format!("ssh://{}/{}", &caps[1], &caps[2]),
    );

    if remote.ends_with(".git") {
        remote
    } else {
        format!("{remote}.git")
    }
}

/// Returns the browsable HTTPS URL of the repository a specifier points at.
///
/// `pkg@https://host/o/r.git`, `pkg@ssh://git@host/o/r.git`,
/// `pkg@git@host:o/r.git` and `pkg@git:git@host:o/r.git` (each with or
/// without `#ref`) all yield `https://host/o/r`.
#[must_use]
pub fn repo_http_url(package_id: &str) -> String {
    let Some(caps) = PACKAGE_ID_RE.captures(package_id) else {
        return String::new();
    };

    let url = SCP_PREFIX_RE.replace_all(&caps[1], "https://${2}/");
    let url = url.replace("ssh://", "https://").replace("git@", "");
    url.strip_suffix(".git").unwrap_or(&url).to_string()
}

/// Returns the ref fragment of a specifier, or "" for the default branch.
#[must_use]
pub fn ref_name(package_id: &str) -> String {
    REF_NAME_RE
        .captures(package_id)
        .map_or_else(String::new, |caps| caps[1].to_string())
}

/// Returns the `owner/repo` identity of a specifier.
#[must_use]
pub fn repo_id(package_id: &str) -> String {
    REPO_ID_RE
        .captures(&repo_http_url(package_id))
        .map_or_else(String::new, |caps| caps[1].to_string())
}

/// Returns the commit hash the host embedded after the final `@` of a
/// resolved package path.
#[must_use]
pub fn revision_hash(resolved_path: &str) -> String {
    REVISION_RE
        .captures(resolved_path)
        .map_or_else(String::new, |caps| caps[1].to_string())
}

/// Builds `{repo url}/{blob segment}/{hash}/{file}` for browsing a file of
/// an installed package at its exact revision.
#[must_use]
pub fn file_url(
    package_id: &str,
    resolved_path: &str,
    file_path: &str,
    hosts: &HostSettings,
) -> String {
    if file_path.is_empty() {
        return String::new();
    }

    let repo_url = repo_http_url(package_id);
    let hash = revision_hash(resolved_path);
    if repo_url.is_empty() || hash.is_empty() {
        return String::new();
    }

    let blob = &hosts.host_data(package_id).blob;
    format!("{repo_url}/{blob}/{hash}/{file_path}")
}

/// Finds the first file directly inside `resolved_path` whose name matches
/// the glob `pattern`, skipping `.meta` sidecars.
///
/// Files are visited in name order. Returns the file name relative to
/// `resolved_path`, or "" when nothing matches.
#[must_use]
pub fn file_path(resolved_path: &Path, pattern: &str) -> String {
    if resolved_path.as_os_str().is_empty() || pattern.is_empty() {
        return String::new();
    }
    let Ok(glob) = wax::Glob::new(pattern) else {
        return String::new();
    };
    let Ok(entries) = std::fs::read_dir(resolved_path) else {
        return String::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.ends_with(".meta"))
        .collect();
    names.sort_unstable();

    names
        .into_iter()
        .find(|name| glob.is_match(name.as_str()))
        .unwrap_or_default()
}

/// Re-targets a specifier at `reference`, keeping name and remote verbatim.
///
/// An empty `reference` drops the fragment (default branch).
#[must_use]
pub fn specific_package_id(package_id: &str, reference: &str) -> String {
    if package_id.is_empty() {
        return String::new();
    }

    SPECIFIER_HEAD_RE
        .captures(package_id)
        .map_or_else(String::new, |caps| {
            let head = &caps[1];
            if reference.is_empty() {
                head.to_string()
            } else {
                format!("{head}#{reference}")
            }
        })
}

/// Composes `name@remote#ref` from a fetched manifest name and a canonical
/// remote. An empty `reference` omits the fragment.
#[must_use]
pub fn compose_package_id(name: &str, remote: &str, reference: &str) -> String {
    if name.is_empty() || remote.is_empty() {
        return String::new();
    }
    if reference.is_empty() {
        format!("{name}@{remote}")
    } else {
        format!("{name}@{remote}#{reference}")
    }
}

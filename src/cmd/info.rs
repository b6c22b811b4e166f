// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Info command implementation.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::package::InfoArgs;
use crate::config::Config;
use crate::error::{HostError, Result};
use crate::host::HostSettings;
use crate::identity::{file_path, file_url, ref_name, repo_http_url, repo_id, revision_hash};

/// Documentation files linked from `info`, by key.
const DOC_FILES: [(&str, &str); 3] = [
    ("readme", "README.*"),
    ("changelog", "CHANGELOG.*"),
    ("license", "LICENSE*"),
];

/// Lines printed by `info`, keys sorted and aligned.
///
/// # Errors
///
/// Returns `HostError::InvalidSpecifier` if no repository URL can be derived.
pub fn info_lines(
    package_id: &str,
    resolved_path: Option<&Path>,
    hosts: &HostSettings,
) -> std::result::Result<Vec<String>, HostError> {
    let http_url = repo_http_url(package_id);
    if http_url.is_empty() {
        return Err(HostError::InvalidSpecifier(package_id.to_string()));
    }

    let host = hosts.host_data(package_id);
    let reference = ref_name(package_id);

    let mut fields = BTreeMap::new();
    fields.insert("host", format!("{} ({})", host.name, host.domain));
    fields.insert("http_url", http_url);
    fields.insert("repo_id", repo_id(package_id));
    fields.insert(
        "ref",
        if reference.is_empty() {
            "(default)".to_string()
        } else {
            reference
        },
    );

    if let Some(resolved) = resolved_path {
        let resolved_str = resolved.to_string_lossy();
        fields.insert("revision", revision_hash(&resolved_str));
        for (key, pattern) in DOC_FILES {
            let url = file_url(package_id, &resolved_str, &file_path(resolved, pattern), hosts);
            if !url.is_empty() {
                fields.insert(key, url);
            }
        }
    }

    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
    Ok(fields
        .into_iter()
        .map(|(key, value)| format!("{key:<width$} = {value}"))
        .collect())
}

/// Handler for `info`.
///
/// # Errors
///
/// Returns an error if the specifier has no resolvable remote.
pub fn run_info_command(args: &InfoArgs, config: &Config) -> Result<()> {
    for line in info_lines(
        &args.package_id,
        args.resolved_path.as_deref(),
        &config.hosts,
    )? {
        println!("{line}");
    }
    Ok(())
}

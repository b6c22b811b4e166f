// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote and package commands.
//!
//! ```text
//! refs     canonicalize --> list_refs --> RefGroups | raw order
//! resolve  Session::resolve --> name@remote#ref
//! add      resolve --> begin_add --> drive --> AddResult
//! update   parse specifier --> resolve(remote, new ref) --> add
//! ```

use anyhow::{Context, bail};
use tracing::{info, warn};

use super::progress::spinner;
use crate::cli::package::{AddArgs, RefsArgs, ResolveArgs, UpdateArgs};
use crate::config::Config;
use crate::error::{GitError, Result};
use crate::git::{RefGroups, ReferenceSet};
use crate::host::{PackageHost, RequestStatus};
use crate::identity::{PackageSpecifier, canonicalize_remote, specific_package_id};
use crate::session::{Resolution, Session};

/// Lines printed by `refs`.
#[must_use]
pub fn format_refs(refs: &ReferenceSet, raw: bool) -> Vec<String> {
    if raw {
        refs.iter().map(str::to_string).collect()
    } else {
        RefGroups::from(refs).iter().map(str::to_string).collect()
    }
}

/// Handler for `refs`.
///
/// # Errors
///
/// Returns an error if the remote is blank, `ls-remote` fails or the remote
/// has no branches or tags.
pub async fn run_refs_command(args: &RefsArgs, config: &Config) -> Result<()> {
    let remote = canonicalize_remote(&args.remote);
    if remote.is_empty() {
        return Err(GitError::InvalidRemote(args.remote.clone()).into());
    }

    let session = Session::from_config(config);
    let pb = spinner("Refs");
    pb.set_message(remote.clone());
    let mut refs = ReferenceSet::new();
    let listed = session.list_refs(&remote, &mut refs).await;
    pb.finish_and_clear();

    if !listed? {
        return Err(GitError::CommandFailed {
            command: format!("{} ls-remote --refs -q {remote}", config.git.executable),
            message: "could not list remote refs".to_string(),
        }
        .into());
    }
    if refs.is_empty() {
        return Err(GitError::NoRefs { url: remote }.into());
    }

    for line in format_refs(&refs, args.raw) {
        println!("{line}");
    }
    Ok(())
}

async fn resolve_with_spinner<H: PackageHost>(
    session: &Session<H>,
    remote: &str,
    reference: &str,
) -> Result<Resolution> {
    let pb = spinner("Resolve");
    pb.set_message(remote.to_string());
    let resolution = session.resolve(remote, reference).await;
    pb.finish_and_clear();

    let resolution = resolution?;
    if !resolution.is_resolved() {
        return Err(GitError::ManifestMissing {
            url: resolution.remote,
            reference: resolution.clone_ref,
        }
        .into());
    }
    Ok(resolution)
}

/// Handler for `resolve`: prints the composed package specifier.
///
/// # Errors
///
/// Returns an error if the remote is blank or no manifest was found.
pub async fn run_resolve_command(args: &ResolveArgs, config: &Config) -> Result<()> {
    let session = Session::from_config(config);
    let resolution = resolve_with_spinner(&session, &args.remote, &args.reference).await?;
    println!("{}", resolution.package_id);
    Ok(())
}

async fn add_with_spinner<H: PackageHost>(session: &Session<H>, package_id: &str) -> Result<()> {
    let pb = spinner("Add Package");
    pb.set_message(format!("Cloning {package_id}"));
    let result = session.add(package_id).await;
    pb.finish_and_clear();

    let result = result.with_context(|| format!("failed to add {package_id}"))?;
    match result.status {
        RequestStatus::Success => {
            info!(package = %package_id, "package added");
            println!("Added {package_id}");
            Ok(())
        }
        RequestStatus::Failure { message, code } => {
            bail!("failed to add {package_id}: {message} ({code})")
        }
        RequestStatus::InProgress => bail!("add of {package_id} did not finish"),
    }
}

/// Handler for `add`.
///
/// # Errors
///
/// Returns an error if resolution fails or the host reports a failure.
pub async fn run_add_command(args: &AddArgs, config: &Config) -> Result<()> {
    let session = Session::from_config(config);
    let resolution = resolve_with_spinner(&session, &args.remote, &args.reference).await?;
    add_with_spinner(&session, &resolution.package_id).await
}

/// Handler for `update`.
///
/// The remote is re-resolved at the new ref; name and remote of the installed
/// specifier are kept verbatim.
///
/// # Errors
///
/// Returns an error if the specifier is malformed, no manifest exists at the
/// new ref, or the host reports a failure.
pub async fn run_update_command(args: &UpdateArgs, config: &Config) -> Result<()> {
    let installed: PackageSpecifier = args.package_id.parse()?;

    let session = Session::from_config(config);
    let resolution = resolve_with_spinner(&session, installed.remote(), &args.reference).await?;
    if resolution.manifest.name() != installed.name() {
        warn!(
            installed = %installed.name(),
            fetched = %resolution.manifest.name(),
            "package name differs at the new ref"
        );
    }

    let target = specific_package_id(&args.package_id, &resolution.reference);
    add_with_spinner(&session, &target).await
}

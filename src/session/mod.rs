// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolver session: one runner, one poller, one scratch directory.
//!
//! ```text
//!                     Session
//!        ,---------------+----------------,
//!        |               |                |
//!   Git (runner)     AddPoller<H>     scratch dir
//!    list_refs        begin_add
//!    fetch_manifest   tick / drive
//!        |               |
//!        '----- is_busy() ----'
//!
//! Git entry points are rejected while an add is polled, and adds are
//! rejected while git runs.
//!
//! resolve(remote, ref)
//!   canonicalize --> list_refs --> select_ref --> fetch_manifest_name
//!                                             --> compose_package_id
//! ```


use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::process::ProcessRunner;
use crate::error::{GitError, HostError, ProcessError, UpmResult};
use crate::git::{DEFAULT_REF, Git, ManifestOutcome, ReferenceSet, select_ref};
use crate::host::{ManifestHost, PackageHost};
use crate::identity::{canonicalize_remote, compose_package_id};
use crate::install::{AddCompletion, AddPoller, AddResult};

/// Everything learned about a remote for one ref selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical remote.
    pub remote: String,
    /// Branches and tags, in `ls-remote` order.
    pub refs: ReferenceSet,
    /// Ref used for the manifest clone.
    pub clone_ref: String,
    /// Ref recorded in the package specifier; "" for the default branch.
    pub reference: String,
    pub manifest: ManifestOutcome,
    /// `name@remote[#ref]`, or "" when no manifest was found.
    pub package_id: String,
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.package_id.is_empty()
    }
}

/// Owns the single-flight state shared by every operation.
#[derive(Debug)]
pub struct Session<H: PackageHost = ManifestHost> {
    git: Git,
    poller: AddPoller<H>,
    scratch: PathBuf,
    poll_interval: Duration,
}

impl Session<ManifestHost> {
    /// Builds a session writing to the configured project manifest.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut runner = ProcessRunner::new().with_timeout(config.git.timeout());
        for (key, value) in config.git.env_vars() {
            runner = runner.with_env(key, value);
        }
        let git = Git::new(runner).with_executable(config.git.executable.clone());
        let host = ManifestHost::new(config.paths.manifest_path());

        Self::new(git, host, config.paths.scratch_dir()).with_poll_interval(config.poll.interval())
    }
}

impl<H: PackageHost> Session<H> {
    pub fn new(git: Git, host: H, scratch: impl Into<PathBuf>) -> Self {
        Self {
            git,
            poller: AddPoller::new(host),
            scratch: scratch.into(),
            poll_interval: Duration::from_millis(100),
        }
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub const fn git(&self) -> &Git {
        &self.git
    }

    pub const fn poller(&self) -> &AddPoller<H> {
        &self.poller
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    /// True while a git process runs or an add request is being polled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.git.runner().is_running() || self.poller.is_polling()
    }

    fn ensure_no_add(&self) -> UpmResult<()> {
        match self.poller.active() {
            Some(active) => Err(HostError::RequestActive { active }.into()),
            None => Ok(()),
        }
    }

    /// See [`Git::list_refs`].
    ///
    /// # Errors
    ///
    /// Returns `HostError::RequestActive` while an add is polled and
    /// `ProcessError::Busy` if a process is running.
    pub async fn list_refs(&self, url: &str, refs: &mut ReferenceSet) -> UpmResult<bool> {
        self.ensure_no_add()?;
        Ok(self.git.list_refs(url, refs).await?)
    }

    /// See [`Git::fetch_manifest_name`]; clones into the session scratch
    /// directory.
    ///
    /// # Errors
    ///
    /// Same as [`Session::list_refs`].
    pub async fn fetch_manifest_name(
        &self,
        url: &str,
        reference: &str,
    ) -> UpmResult<ManifestOutcome> {
        self.ensure_no_add()?;
        Ok(self
            .git
            .fetch_manifest_name(url, reference, &self.scratch)
            .await?)
    }

    /// Resolves `raw_remote` at `requested` ("" for the default branch).
    ///
    /// A ref the remote does not list falls back to the default branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidRemote` for a blank remote, otherwise the
    /// errors of [`Session::list_refs`].
    pub async fn resolve(&self, raw_remote: &str, requested: &str) -> UpmResult<Resolution> {
        let remote = canonicalize_remote(raw_remote);
        if remote.is_empty() {
            return Err(GitError::InvalidRemote(raw_remote.to_string()).into());
        }

        let mut refs = ReferenceSet::new();
        self.list_refs(&remote, &mut refs).await?;

        let clone_ref = select_ref(&refs, requested).to_string();
        let reference = if clone_ref == DEFAULT_REF {
            if !requested.is_empty() {
                info!(requested = %requested, "ref not found on remote, using default branch");
            }
            String::new()
        } else {
            clone_ref.clone()
        };

        let manifest = self.fetch_manifest_name(&remote, &clone_ref).await?;
        let package_id = compose_package_id(manifest.name(), &remote, &reference);
        debug!(remote = %remote, package_id = %package_id, "resolved");

        Ok(Resolution {
            remote,
            refs,
            clone_ref,
            reference,
            manifest,
            package_id,
        })
    }

    /// See [`AddPoller::begin_add`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Busy` while git runs, `HostError::RequestActive`
    /// while another add is polled, or the host's submission error.
    pub fn begin_add(&self, package_id: &str) -> UpmResult<AddCompletion> {
        if let Some(running) = self.git.runner().active() {
            debug!(running = %running, package = %package_id, "add rejected, git is running");
            return Err(ProcessError::Busy {
                command: format!("add {package_id}"),
            }
            .into());
        }
        Ok(self.poller.begin_add(package_id)?)
    }

    /// Submits `package_id` and ticks at the session interval until the host
    /// reports a terminal status.
    ///
    /// # Errors
    ///
    /// Same as [`Session::begin_add`].
    pub async fn add(&self, package_id: &str) -> UpmResult<AddResult> {
        let completion = self.begin_add(package_id)?;
        self.poller.drive(self.poll_interval).await;
        Ok(completion.await)
    }
}

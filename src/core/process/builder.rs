// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Description of one external invocation.
//!
//! ```text
//! ProcessBuilder::locate("git")?      PATH lookup, cached per name
//!   --> ProcessBuilder::new(path)
//!         .name("git") .args([..]) .env_var(k, v)
//!         .capture_output()           KEEP_STDOUT | KEEP_STDERR
//!         .maybe_timeout(Some(d))
//! ```
//!
//! Every output line is traced; only kept streams reach the caller's sink.
//! The exit code is reported as-is; judging it is up to the caller.

use bitflags::bitflags;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::Duration;

use crate::error::ProcessError;

static RESOLVED: LazyLock<Mutex<HashMap<String, PathBuf>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u8 {
        const KEEP_STDOUT = 1 << 0;
        const KEEP_STDERR = 1 << 1;
    }
}

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }

    /// Flag that routes this stream into the sink.
    #[must_use]
    pub const fn keep_flag(self) -> ProcessFlags {
        match self {
            Self::Stdout => ProcessFlags::KEEP_STDOUT,
            Self::Stderr => ProcessFlags::KEEP_STDERR,
        }
    }
}

/// Program, arguments and handling for one run.
///
/// Arguments go to the executable as a vector, never through a shell, so
/// remote URLs and ref names cannot inject commands.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
    flags: ProcessFlags,
    name: Option<String>,
    timeout: Option<Duration>,
}

impl ProcessBuilder {
    /// `program` is used as given; see [`ProcessBuilder::locate`] for PATH lookup.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
            flags: ProcessFlags::empty(),
            name: None,
            timeout: None,
        }
    }

    /// Resolves `program` on PATH. Hits are remembered for the life of the
    /// process; misses are looked up again next time.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when nothing on PATH matches.
    pub fn locate(program: &str) -> Result<PathBuf, ProcessError> {
        let mut resolved = RESOLVED.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = resolved.get(program) {
            return Ok(path.clone());
        }
        let path = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
            name: program.to_string(),
        })?;
        resolved.insert(program.to_string(), path.clone());
        Ok(path)
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Sets a variable on top of the inherited environment.
    #[must_use]
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    #[must_use]
    pub fn capture_output(self) -> Self {
        self.flag(ProcessFlags::KEEP_STDOUT | ProcessFlags::KEEP_STDERR)
    }

    /// Name used in log fields instead of the program's file stem.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Kills the process once `duration` elapses; `None` waits forever.
    #[must_use]
    pub const fn maybe_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout = duration;
        self
    }

    /// Program followed by its arguments, quoting any that contain spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().map(|arg| {
                if arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(super) fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .program
                .file_stem()
                .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned()),
        }
    }

    pub(super) const fn program(&self) -> &PathBuf {
        &self.program
    }

    pub(super) fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub(super) fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub(super) const fn keeps(&self, stream: StreamKind) -> bool {
        self.flags.contains(stream.keep_flag())
    }

    pub(super) const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

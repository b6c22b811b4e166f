// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Launching and awaiting a described process.
//!
//! ```text
//! spawn()  stdin null, stdout/stderr piped
//!    |
//! wait_with_sink(child, sink)
//!    drain both pipes, wait (or time out) --> exit code
//! ```

use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{Child, Command};
use tracing::{debug, trace};

use super::builder::ProcessBuilder;
use super::io::LineSink;
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Starts the process without waiting for it. Needs a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the executable cannot be launched.
    pub fn spawn(&self) -> Result<Child, ProcessError> {
        let command_line = self.command_line();
        debug!(cmd = %command_line, "exec");

        let mut command = Command::new(self.program());
        command
            .args(self.arg_list())
            .envs(self.env_vars().iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        let child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: command_line,
            source,
        })?;
        trace!(process = %self.display_name(), pid = ?child.id(), "spawned");
        Ok(child)
    }

    /// Streams `child` into `sink` and returns its exit code once both pipes
    /// are drained. A non-zero code is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the deadline passes and `SpawnFailed` if waiting
    /// on the child fails.
    pub async fn wait_with_sink(
        &self,
        child: Child,
        sink: Arc<dyn LineSink>,
    ) -> Result<i32, ProcessError> {
        let exit_code = self.drive_child(child, sink).await?;
        trace!(process = %self.display_name(), exit_code, "completed");
        Ok(exit_code)
    }
}

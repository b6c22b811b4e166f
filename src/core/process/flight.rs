// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-flight process runner.
//!
//! ```text
//! ProcessRunner::run(program, args) = claim(..)?.launch()
//!     |
//!  claim: slot busy? -------------> Err(ProcessError::Busy)
//!         lock slot: running = cmd, clear stdout/stderr buffers
//!     |   (a dropped Claim frees the slot)
//!  launch: not on PATH / spawn fails -> Completion { success: false } (now)
//!     |
//!     v
//!  tokio::spawn ---------------------------------------+
//!     |                                                |
//!  return Completion                         drive child, lines --> slot
//!                                                      |
//!                                   lock slot: running = None, send outcome
//! ```
//!
//! The busy flag is cleared and the outcome is sent while holding the same
//! lock, so an observer that sees the runner idle can rely on the outcome
//! already being delivered.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, error};

use super::builder::{ProcessBuilder, StreamKind};
use super::io::LineSink;
use crate::error::ProcessError;

/// Result delivered once per [`ProcessRunner::run`] call.
///
/// stderr is only logged; callers branch on `success` and read `stdout`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    success: bool,
    stdout: String,
}

impl RunOutcome {
    /// Creates an outcome.
    #[must_use]
    pub const fn new(success: bool, stdout: String) -> Self {
        Self { success, stdout }
    }

    /// Outcome for a process that never ran.
    #[must_use]
    pub const fn not_launched() -> Self {
        Self::new(false, String::new())
    }

    /// Whether the process exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Accumulated stdout, one `\n`-terminated line per output line.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }
}

/// Future resolving to the [`RunOutcome`] of one invocation.
///
/// Dropping it does not stop the process; the outcome is discarded.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<RunOutcome>,
}

impl Completion {
    /// A completion that is already resolved.
    fn ready(outcome: RunOutcome) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { rx }
    }
}

impl Future for Completion {
    type Output = RunOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| RunOutcome::not_launched()))
    }
}

/// Shared state of the single-flight slot.
#[derive(Debug, Default)]
struct Slot {
    /// Command line of the in-flight process.
    running: Option<String>,
    /// Reused accumulation buffers, reset at the start of every run.
    stdout: String,
    stderr: String,
}

/// Sink that appends lines to the slot buffers.
struct SlotSink(Arc<Mutex<Slot>>);

impl LineSink for SlotSink {
    fn append(&self, stream: StreamKind, line: &str) {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let buf = match stream {
            StreamKind::Stdout => &mut slot.stdout,
            StreamKind::Stderr => &mut slot.stderr,
        };
        buf.push_str(line);
        buf.push('\n');
    }
}

/// Runs one external process at a time and reports its outcome.
///
/// Clones share the same slot, so components holding a clone are serialized
/// against each other.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    slot: Arc<Mutex<Slot>>,
    env: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Creates an idle runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable to every invocation.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Kills invocations that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a process is between start and outcome delivery.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().running.is_some()
    }

    /// Command line of the in-flight process.
    #[must_use]
    pub fn active(&self) -> Option<String> {
        self.lock().running.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Occupies the slot for `program args` without starting anything yet.
    ///
    /// The runner reports busy from here on; dropping the [`Claim`] without
    /// launching frees the slot again.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Busy` if another invocation holds the slot.
    pub fn claim<I, S>(&self, program: &str, args: I) -> Result<Claim, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let command_line = format!("{program} {}", args.join(" "));

        let mut slot = self.lock();
        if let Some(active) = &slot.running {
            debug!(active = %active, rejected = %command_line, "runner busy");
            return Err(ProcessError::Busy {
                command: command_line,
            });
        }
        slot.running = Some(command_line.clone());
        slot.stdout.clear();
        slot.stderr.clear();
        drop(slot);

        Ok(Claim {
            runner: Some(self.clone()),
            program: program.to_string(),
            args,
            command_line,
        })
    }

    /// Launches `program` with `args` and returns at once.
    ///
    /// Must be called from within a Tokio runtime. The returned future resolves
    /// exactly once, after the process exited and all of its output was read.
    /// A missing or unlaunchable executable resolves immediately with
    /// `success == false`; that failure is logged, not retried.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Busy` if another invocation is still in flight.
    pub fn run<I, S>(&self, program: &str, args: I) -> Result<Completion, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.claim(program, args)?.launch())
    }
}

/// A held runner slot, see [`ProcessRunner::claim`].
#[derive(Debug)]
#[must_use = "dropping a claim frees the slot without running anything"]
pub struct Claim {
    runner: Option<ProcessRunner>,
    program: String,
    args: Vec<String>,
    command_line: String,
}

impl Claim {
    /// Command line the slot was claimed for.
    #[must_use]
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Starts the claimed process; see [`ProcessRunner::run`].
    #[must_use]
    pub fn launch(mut self) -> Completion {
        let Some(runner) = self.runner.take() else {
            return Completion::ready(RunOutcome::not_launched());
        };
        let program = std::mem::take(&mut self.program);
        let command_line = std::mem::take(&mut self.command_line);

        let path = match ProcessBuilder::locate(&program) {
            Ok(path) => path,
            Err(e) => {
                runner.lock().running = None;
                error!(error = %e, "No '{program}' executable was found. Install it and make sure it is on PATH");
                return Completion::ready(RunOutcome::not_launched());
            }
        };

        let mut builder = ProcessBuilder::new(path)
            .name(&program)
            .args(&self.args)
            .capture_output()
            .maybe_timeout(runner.timeout);
        for (key, value) in &runner.env {
            builder = builder.env_var(key, value);
        }

        let child = match builder.spawn() {
            Ok(child) => child,
            Err(e) => {
                runner.lock().running = None;
                error!(error = %e, "failed to launch '{program}'");
                return Completion::ready(RunOutcome::not_launched());
            }
        };

        let (tx, rx) = oneshot::channel();
        let slot = Arc::clone(&runner.slot);
        tokio::spawn(async move {
            let sink: Arc<dyn LineSink> = Arc::new(SlotSink(Arc::clone(&slot)));
            let exit = builder.wait_with_sink(child, sink).await;

            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            let success = matches!(exit, Ok(0));
            if !success {
                let stderr = slot.stderr.trim_end();
                match &exit {
                    Ok(code) => error!(command = %command_line, code, stderr = %stderr, "Error: {command_line}"),
                    Err(e) => error!(command = %command_line, error = %e, stderr = %stderr, "Error: {command_line}"),
                }
            }
            let outcome = RunOutcome::new(success, slot.stdout.clone());
            slot.running = None;
            let _ = tx.send(outcome);
        });

        Completion { rx }
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        if let Some(runner) = self.runner.take() {
            debug!(command = %self.command_line, "claim released without launch");
            runner.lock().running = None;
        }
    }
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipe readers.
//!
//! One task per pipe reads lines until EOF. Each line is traced; lines from
//! kept streams are appended to the sink. The exit code is returned only
//! after both tasks finish.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, StreamKind};
use crate::error::ProcessError;

/// Receives output lines, without terminators, in per-stream order.
pub trait LineSink: Send + Sync {
    fn append(&self, stream: StreamKind, line: &str);
}

struct Reader {
    process: String,
    stream: StreamKind,
    sink: Option<Arc<dyn LineSink>>,
}

impl Reader {
    fn spawn<R>(self, pipe: Option<R>) -> Option<JoinHandle<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        pipe.map(|pipe| tokio::spawn(self.drain(pipe)))
    }

    async fn drain<R: AsyncRead + Unpin>(self, pipe: R) {
        let mut lines = BufReader::new(pipe).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    trace!(process = %self.process, stream = self.stream.as_str(), "{line}");
                    if let Some(sink) = &self.sink {
                        sink.append(self.stream, &line);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(process = %self.process, stream = self.stream.as_str(), error = %e, "read failed");
                    break;
                }
            }
        }
    }
}

async fn join(handles: [Option<JoinHandle<()>>; 2]) {
    for handle in handles.into_iter().flatten() {
        let _ = handle.await;
    }
}

impl ProcessBuilder {
    fn reader(&self, stream: StreamKind, sink: &Arc<dyn LineSink>) -> Reader {
        Reader {
            process: self.display_name(),
            stream,
            sink: self.keeps(stream).then(|| Arc::clone(sink)),
        }
    }

    /// Exit code of `child` after both pipes reach EOF. A signal-terminated
    /// process reports -1.
    pub(super) async fn drive_child(
        &self,
        mut child: Child,
        sink: Arc<dyn LineSink>,
    ) -> Result<i32, ProcessError> {
        let readers = [
            self.reader(StreamKind::Stdout, &sink).spawn(child.stdout.take()),
            self.reader(StreamKind::Stderr, &sink).spawn(child.stderr.take()),
        ];

        let waited = match self.timeout() {
            Some(limit) => tokio::select! {
                status = child.wait() => status,
                () = tokio::time::sleep(limit) => {
                    warn!(process = %self.display_name(), timeout = ?limit, "timed out, killing");
                    child.kill().await.ok();
                    join(readers).await;
                    return Err(ProcessError::Timeout {
                        command: self.command_line(),
                        timeout_secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        };
        let status = waited.map_err(|source| ProcessError::SpawnFailed {
            command: self.command_line(),
            source,
        })?;

        join(readers).await;
        Ok(status.code().unwrap_or(-1))
    }
}

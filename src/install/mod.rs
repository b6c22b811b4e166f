// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Add/update request polling.
//!
//! ```text
//!            begin_add(id)                 tick(): status terminal
//!   Idle ----------------------> Polling -----------------------------> Idle
//!     ^   submit_add --> handle    |  ^     take slot, log failure,
//!     |                            |  |     send AddResult
//!     |                            +--+
//!     |                 tick(): InProgress (no-op)
//!     |
//!   begin_add while Polling --> Err(HostError::RequestActive)
//! ```
//!
//! Progress happens only inside [`AddPoller::tick`]. Callers without an
//! external tick source use [`AddPoller::drive`], which ticks from a timer.


use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::HostError;
use crate::host::{HostErrorCode, PackageHost, RequestStatus};

/// Final state of one add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddResult {
    pub package_id: String,
    pub status: RequestStatus,
}

impl AddResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RequestStatus::Success
    }
}

/// Future resolving once the request reaches a terminal status.
#[derive(Debug)]
pub struct AddCompletion {
    package_id: String,
    rx: oneshot::Receiver<AddResult>,
}

impl Future for AddCompletion {
    type Output = AddResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let package_id = self.package_id.clone();
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| AddResult {
                package_id,
                status: RequestStatus::Failure {
                    message: "request abandoned before completion".to_string(),
                    code: HostErrorCode::Unknown,
                },
            })
        })
    }
}

/// Observable poller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

struct ActiveRequest<T> {
    package_id: String,
    handle: T,
    tx: oneshot::Sender<AddResult>,
}

/// Single-slot poller over a [`PackageHost`].
pub struct AddPoller<H: PackageHost> {
    host: H,
    slot: Mutex<Option<ActiveRequest<H::Handle>>>,
}

impl<H: PackageHost> std::fmt::Debug for AddPoller<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddPoller")
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}

impl<H: PackageHost> AddPoller<H> {
    pub const fn new(host: H) -> Self {
        Self {
            host,
            slot: Mutex::new(None),
        }
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    fn lock(&self) -> MutexGuard<'_, Option<ActiveRequest<H::Handle>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Specifier of the request being polled.
    #[must_use]
    pub fn active(&self) -> Option<String> {
        self.lock().as_ref().map(|active| active.package_id.clone())
    }

    #[must_use]
    pub fn state(&self) -> PollState {
        if self.lock().is_some() {
            PollState::Polling
        } else {
            PollState::Idle
        }
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.state() == PollState::Polling
    }

    /// Submits `package_id` and occupies the slot until a tick observes a
    /// terminal status.
    ///
    /// # Errors
    ///
    /// Returns `HostError::RequestActive` while another request is polled, or
    /// whatever the host returns when it rejects the submission. The slot stays
    /// free in both cases.
    pub fn begin_add(&self, package_id: &str) -> Result<AddCompletion, HostError> {
        let mut slot = self.lock();
        if let Some(active) = slot.as_ref() {
            return Err(HostError::RequestActive {
                active: active.package_id.clone(),
            });
        }

        let handle = self.host.submit_add(package_id)?;
        info!("Cloning {package_id}");

        let (tx, rx) = oneshot::channel();
        *slot = Some(ActiveRequest {
            package_id: package_id.to_string(),
            handle,
            tx,
        });
        Ok(AddCompletion {
            package_id: package_id.to_string(),
            rx,
        })
    }

    /// Inspects the active request once.
    ///
    /// On a terminal status the slot is released before the result is
    /// delivered, so a caller woken by the completion can start the next add.
    pub fn tick(&self) -> PollState {
        let mut slot = self.lock();
        let status = match slot.as_ref() {
            None => return PollState::Idle,
            Some(active) => self.host.poll_status(&active.handle),
        };
        if !status.is_terminal() {
            return PollState::Polling;
        }

        let Some(active) = slot.take() else {
            return PollState::Idle;
        };
        match &status {
            RequestStatus::Failure { message, code } => {
                error!(package = %active.package_id, %code, "Error: {message} ({code})");
            }
            _ => debug!(package = %active.package_id, "add request finished"),
        }
        let _ = active.tx.send(AddResult {
            package_id: active.package_id,
            status,
        });
        PollState::Idle
    }

    /// Ticks every `period` until the slot is idle.
    pub async fn drive(&self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if self.tick() == PollState::Idle {
                break;
            }
        }
    }
}

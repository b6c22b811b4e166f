// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host package-manager boundary.

use std::fmt;

use crate::error::HostError;

/// Error classification reported by the host for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorCode {
    /// Package or repository does not exist.
    NotFound,
    /// The specifier was rejected.
    InvalidParameter,
    /// The project changed underneath the request.
    Conflict,
    /// Anything else.
    Unknown,
}

impl fmt::Display for HostErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "NotFound",
            Self::InvalidParameter => "InvalidParameter",
            Self::Conflict => "Conflict",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Status of a submitted add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    InProgress,
    Success,
    Failure { message: String, code: HostErrorCode },
}

impl RequestStatus {
    /// Success or failure.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// The host's asynchronous "add package" API.
///
/// `poll_status` must not block; it inspects whatever the host has reported
/// so far.
pub trait PackageHost {
    /// Opaque request handle.
    type Handle;

    /// Submits `package_id` for installation.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the host refuses the submission outright.
    fn submit_add(&self, package_id: &str) -> Result<Self::Handle, HostError>;

    /// Current status of a submitted request.
    fn poll_status(&self, handle: &Self::Handle) -> RequestStatus;
}

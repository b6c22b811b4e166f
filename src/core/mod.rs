// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!           core
//!             |
//!          process
//!          /      \
//!   ProcessBuilder  ProcessRunner
//!   spawn/stream    single-flight slot
//! ```

pub mod process;

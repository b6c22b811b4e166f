// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       refs / resolve / add / update
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          session          |
//!              |  resolve remote --> add   |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               git       install     host
//!          ls-remote,    add poller  manifest
//!          clone/read                 writer
//!
//!   +-----------------------------------------+
//!   |  identity   remote/package id parsing   |
//!   +-----------------------------------------+
//!   |  core   single-flight process runner    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod host;
pub mod identity;
pub mod install;
pub mod logging;
pub mod session;

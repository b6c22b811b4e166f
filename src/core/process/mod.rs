// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External processes.
//!
//! ```text
//! ProcessBuilder    one invocation: args, env, kept streams, timeout
//!   .spawn() + .wait_with_sink()      lines --> LineSink, exit code
//!
//! ProcessRunner     one invocation at a time, shared by clones
//!   .run(program, args) --> Completion --> RunOutcome { success, stdout }
//! ```

pub mod builder;
pub mod flight;
mod io;
mod runner;

pub use builder::{ProcessBuilder, ProcessFlags, StreamKind};
pub use flight::{Claim, Completion, ProcessRunner, RunOutcome};
pub use io::LineSink;

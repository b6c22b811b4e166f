// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for upm-git using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! upm-git [global options] <command>
//! refs <REMOTE> [--raw]
//! resolve <REMOTE> [--ref REF]
//! info <PACKAGE_ID> [--resolved-path DIR]
//! add <REMOTE> [--ref REF]
//! update <PACKAGE_ID> [--ref REF]
//! options
//! version
//! ```

pub mod global;
pub mod package;


use crate::cli::global::GlobalOptions;
use crate::cli::package::{AddArgs, InfoArgs, RefsArgs, ResolveArgs, UpdateArgs};
use clap::{Parser, Subcommand};

/// Git Package Resolver
///
/// Resolves git remotes into installable package specifiers.
#[derive(Debug, Parser)]
#[command(
    name = "upm-git",
    author,
    version,
    about = "Git Package Resolver",
    long_about = "upm-git Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Lists the branches and tags of a git remote, reads the package\n\
                  name from a shallow clone and records `name@remote#ref` in the\n\
                  project manifest. See `upm-git <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  upm-git reads `upm-git.toml` from the current directory if it\n\
                  exists, then every file given with --config, in order. UPMGIT_*\n\
                  environment variables (UPMGIT_GIT__EXECUTABLE=...) override\n\
                  files; --set KEY=VALUE and the dedicated flags override everything.\n\
                  `upm-git options` shows the result."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Subcommand; none prints an error and exits non-zero.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists configuration sources and every effective value.
    Options,

    /// Lists the branches and tags of a remote.
    Refs(RefsArgs),

    /// Prints the package specifier a remote resolves to.
    Resolve(ResolveArgs),

    /// Shows repository details of a package specifier.
    Info(InfoArgs),

    /// Adds a git package to the project manifest.
    Add(AddArgs),

    /// Re-targets an installed package at another ref.
    Update(UpdateArgs),
}

/// Parses `std::env::args`, exiting with usage on error.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command arguments.
//!
//! # Subcommands
//!
//! ```text
//! refs git@github.com:o/r          → grouped branch/tag list
//! resolve https://host/o/r -r 1.0  → name@https://host/o/r.git#1.0
//! info name@remote#ref             → http url, repo id, host, file urls
//! add https://host/o/r -r 1.0      → manifest dependencies[name]
//! update name@remote#1.0 -r 2.0    → same package, new ref
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `refs` command.
#[derive(Debug, Clone, Args)]
pub struct RefsArgs {
    /// Remote in scp-like, ssh:// or https:// form.
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Print refs in the order the remote reports them.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Remote in scp-like, ssh:// or https:// form.
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Branch or tag; the default branch when omitted or unknown.
    #[arg(short = 'r', long = "ref", value_name = "REF", default_value = "")]
    pub reference: String,
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Package specifier (`name@remote#ref`).
    #[arg(value_name = "PACKAGE_ID")]
    pub package_id: String,

    /// Installed package directory (ends in `@<commit>`), for revision and file URLs.
    #[arg(long = "resolved-path", value_name = "DIR")]
    pub resolved_path: Option<PathBuf>,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Remote in scp-like, ssh:// or https:// form.
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Branch or tag; the default branch when omitted or unknown.
    #[arg(short = 'r', long = "ref", value_name = "REF", default_value = "")]
    pub reference: String,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Installed package specifier (`name@remote#ref`).
    #[arg(value_name = "PACKAGE_ID")]
    pub package_id: String,

    /// New branch or tag; the default branch when omitted.
    #[arg(short = 'r', long = "ref", value_name = "REF", default_value = "")]
    pub reference: String,
}

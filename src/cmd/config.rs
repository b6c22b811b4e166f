// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options`: effective configuration and where it came from.

use crate::config::Config;
use crate::config::loader::ConfigSource;

/// Comment header naming each source, lowest priority first.
#[must_use]
pub fn source_lines(sources: &[ConfigSource]) -> Vec<String> {
    if sources.is_empty() {
        return vec!["# defaults only".to_string()];
    }
    std::iter::once("# sources, later wins:".to_string())
        .chain(
            sources
                .iter()
                .enumerate()
                .map(|(i, source)| format!("#   {}. {source}", i + 1)),
        )
        .collect()
}

pub fn run_options_command(config: &Config, sources: &[ConfigSource]) {
    for line in source_lines(sources)
        .into_iter()
        .chain(config.format_options())
    {
        println!("{line}");
    }
}

// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Refs | Resolve | Info | Add | Update | Options | Version
//! ```

use std::process::ExitCode;

use upm_git::cli::global::GlobalOptions;
use upm_git::cli::{self, Command};
use upm_git::cmd::config::run_options_command;
use upm_git::cmd::info::run_info_command;
use upm_git::cmd::package::{
    run_add_command, run_refs_command, run_resolve_command, run_update_command,
};
use upm_git::config::loader::{ConfigLoader, ConfigSource};
use upm_git::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use upm_git::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let sources = loader.sources().to_vec();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = LogConfig::from_global(&config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &sources).await
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, sources: &[ConfigSource]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config, sources);
            Ok(())
        }
        Some(Command::Refs(args)) => run_refs_command(args, config).await,
        Some(Command::Resolve(args)) => run_resolve_command(args, config).await,
        Some(Command::Info(args)) => run_info_command(args, config),
        Some(Command::Add(args)) => run_add_command(args, config).await,
        Some(Command::Update(args)) => run_update_command(args, config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> upm_git::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

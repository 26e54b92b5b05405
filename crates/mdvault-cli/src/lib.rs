//! mdvault CLI library
//!
//! Argument definitions and subcommand handlers for the `mdn` binary.

pub mod cli;
pub mod commands;

use anyhow::{Context, Result};
use cli::Cli;
use mdvault_config::{ConfigLoader, VaultConfig};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` refines the CLI level
pub fn init_logging(cli: &Cli) {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve configuration with `--config` and `--vault` applied
pub fn load_config(cli: &Cli) -> Result<VaultConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(vault) = &cli.vault {
        loader = loader.with_vault_path(vault);
    }
    loader.resolve().context("Failed to load configuration")
}

//! Inspect and edit the rpcfinder configuration.
//!
//! This module provides the `config` command with four subcommands:
//!
//! - `show` - the effective configuration and where it came from
//! - `get <KEY>` - one value (`data-dir` or `base-url`)
//! - `set <KEY> <VALUE>` - write one value, preserving file formatting
//! - `path` - the configuration file in effect
//!
//! `set` edits the project file by default (the explicit `--config` path,
//! the `RPCFINDER_CONFIG` override, or the nearest `rpcfinder.toml` walking
//! up from the current directory, creating one here when none exists).
//! `set --global` targets the user-level `~/.rpcfinder/config.toml` instead.
//! Because `data-dir` and `base-url` are mutually exclusive, setting one
//! clears the other.
//!
//! # Examples
//!
//! ```bash
//! rpcfinder config show
//! rpcfinder config get data-dir
//! rpcfinder config set data-dir ./exports
//! rpcfinder config set base-url https://mappings.example.com --global
//! rpcfinder config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{LoadedConfig, SourceKey, edit_target, set_value, user_config_path};
use crate::core::FinderError;
use crate::source::TableSource;

/// Command to manage the rpcfinder configuration.
#[derive(Args)]
pub struct ConfigCommand {
    /// The configuration operation to perform.
    #[command(subcommand)]
    command: ConfigSubcommand,
}

/// Subcommands of `rpcfinder config`.
#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration and its origin
    Show,

    /// Print the value of one key
    Get {
        /// Key to read: data-dir or base-url
        key: String,
    },

    /// Set one key, clearing its mutually exclusive counterpart
    Set {
        /// Key to write: data-dir or base-url
        key: String,
        /// Value to store
        value: String,
        /// Edit the user-level config instead of the project file
        #[arg(long)]
        global: bool,
    },

    /// Print the path of the configuration file in effect
    Path,
}

impl ConfigCommand {
    /// Execute the selected configuration operation.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(config_path).await,
            ConfigSubcommand::Get { key } => get(config_path, &key).await,
            ConfigSubcommand::Set { key, value, global } => {
                set(config_path, &key, &value, global).await
            }
            ConfigSubcommand::Path => path(config_path).await,
        }
    }
}

async fn show(config_path: Option<PathBuf>) -> Result<()> {
    let loaded = LoadedConfig::discover(config_path).await?;

    match &loaded.path {
        Some(file) => println!("{} {}", "Config file:".bold(), file.display()),
        None => println!("{} {}", "Config file:".bold(), "none (built-in defaults)".dimmed()),
    }
    for key in [SourceKey::DataDir, SourceKey::BaseUrl] {
        match loaded.config.get(key) {
            Some(value) => println!("  {key} = {value}"),
            None => println!("  {key} {}", "(unset)".dimmed()),
        }
    }
    println!("{} {}", "Tables:".bold(), loaded.source().describe());
    Ok(())
}

async fn get(config_path: Option<PathBuf>, key: &str) -> Result<()> {
    let key: SourceKey = key.parse()?;
    let loaded = LoadedConfig::discover(config_path).await?;

    if let Some(value) = loaded.config.get(key) {
        println!("{value}");
    }
    Ok(())
}

async fn set(config_path: Option<PathBuf>, key: &str, value: &str, global: bool) -> Result<()> {
    let key: SourceKey = key.parse()?;

    let target = if global {
        user_config_path().ok_or_else(|| FinderError::ConfigError {
            message: "cannot determine the home directory for --global".to_string(),
        })?
    } else {
        edit_target(config_path)
    };

    set_value(&target, key, value).await?;
    println!("{} Set {key} = {value} in {}", "✓".green(), target.display());
    Ok(())
}

async fn path(config_path: Option<PathBuf>) -> Result<()> {
    let loaded = LoadedConfig::discover(config_path).await?;
    match &loaded.path {
        Some(file) => println!("{}", file.display()),
        None => println!("{}", "none (built-in defaults)".dimmed()),
    }
    Ok(())
}

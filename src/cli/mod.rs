//! Command-line interface for rpcfinder.
//!
//! Each subcommand lives in its own module with its own argument structure
//! and execution logic, so commands stay independently testable and new ones
//! slot in without touching the others.
//!
//! # Available Commands
//!
//! ## Lookup
//! - `search` - Resolve an RPC class name to its JavaScript implementations
//! - `suggest` - List RPC class names containing a fragment
//! - `stats` - Show row counts, source location, and load freshness
//!
//! ## Project Management
//! - `init` - Scaffold `rpcfinder.toml` and template mapping tables
//! - `config` - Inspect and edit the configuration file
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--no-progress` - Disable the loading spinner
//! - `--config` - Path to a specific `rpcfinder.toml`
//!
//! # Example
//!
//! ```bash
//! # Scaffold a project with sample tables
//! rpcfinder init
//!
//! # Resolve a class, case-insensitively
//! rpcfinder search jp.co.testRIclass
//!
//! # Machine-readable output for scripts
//! rpcfinder --quiet search jp.co.testRIclass --format json
//!
//! # Candidates when only a fragment is known
//! rpcfinder suggest testri
//! ```

pub mod common;
mod config;
mod init;
mod search;
mod stats;
mod suggest;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global CLI flags.
///
/// Commands receive these values explicitly instead of reading mutated
/// process environment, which keeps tests free of global state and makes the
/// flag flow visible at the call sites.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    ///
    /// `--verbose` maps to `"debug"`, `--quiet` to `"error"`, otherwise
    /// `"info"`. `None` also means `"info"`.
    pub log_level: Option<String>,

    /// Whether the loading spinner is suppressed.
    ///
    /// Carries the `--no-progress` flag; the `RPCFINDER_NO_PROGRESS`
    /// environment variable is honored independently by the spinner itself.
    pub no_progress: bool,

    /// Explicit configuration file path from `--config`.
    ///
    /// `None` runs the normal discovery chain (environment variable, upward
    /// search, user-level file, defaults).
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Configuration with default values: info-level logging, spinner
    /// enabled, discovered config file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// An explicit `RUST_LOG` wins over the flag-derived level. Logs go to
    /// stderr so stdout stays parseable. Safe to call more than once; later
    /// calls are ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_deref().unwrap_or("info")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for rpcfinder.
///
/// The root command with its global options. Options marked `global = true`
/// are accepted by every subcommand, so `rpcfinder search x --verbose` and
/// `rpcfinder --verbose search x` both work.
#[derive(Parser)]
#[command(
    name = "rpcfinder",
    about = "RPC class finder - look up the JavaScript class behind an RPC class name",
    version,
    author,
    long_about = "rpcfinder resolves RPC class names to the JavaScript classes and source \
                  files that implement them, using two CSV mapping tables read from a local \
                  directory or an HTTP endpoint."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors, for scripts and automation.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a specific rpcfinder.toml.
    ///
    /// Overrides the discovery chain (RPCFINDER_CONFIG, upward search from
    /// the current directory, user-level config). The file must exist.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable the loading spinner.
    ///
    /// Useful for CI logs and terminals without ANSI support. Setting the
    /// RPCFINDER_NO_PROGRESS environment variable has the same effect.
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands of the rpcfinder CLI.
#[derive(Subcommand)]
enum Commands {
    /// Resolve an RPC class name to its JavaScript implementations.
    ///
    /// Matches the query case-insensitively against the rpc-mappings table
    /// and prints every JavaScript class and file path registered for the
    /// matched RPC name.
    ///
    /// See [`search::SearchCommand`] for detailed options and behavior.
    Search(search::SearchCommand),

    /// List RPC class names containing a fragment.
    ///
    /// Case-insensitive substring match over the rpc-mappings table,
    /// printing at most ten candidates in table order.
    ///
    /// See [`suggest::SuggestCommand`] for detailed options and behavior.
    Suggest(suggest::SuggestCommand),

    /// Show dataset statistics.
    ///
    /// Loads (or reuses) the mapping tables and prints row counts, the
    /// configured source, and the time of the last successful load.
    ///
    /// See [`stats::StatsCommand`] for detailed options and behavior.
    Stats(stats::StatsCommand),

    /// Initialize a directory with a config file and template tables.
    ///
    /// Creates `rpcfinder.toml` plus `data/rpc-mappings.csv` and
    /// `data/js-mappings.csv` with one sample row each, refusing to
    /// overwrite existing files unless `--force` is given.
    ///
    /// See [`init::InitCommand`] for detailed options and behavior.
    Init(init::InitCommand),

    /// Inspect and edit the configuration file.
    ///
    /// Shows the effective configuration, reads or writes the `data-dir`
    /// and `base-url` keys, and prints which file is in effect.
    ///
    /// See [`config::ConfigCommand`] for detailed options and behavior.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed arguments.
    ///
    /// This is the main entry point: it derives a [`CliConfig`] from the
    /// global flags and delegates to
    /// [`execute_with_config`](Self::execute_with_config).
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration.
    ///
    /// Tests and programmatic callers can pass their own [`CliConfig`]
    /// instead of deriving one from flags. Initializes logging once, then
    /// dispatches to the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Search(cmd) => cmd.execute(config.config_path, config.no_progress).await,
            Commands::Suggest(cmd) => cmd.execute(config.config_path, config.no_progress).await,
            Commands::Stats(cmd) => cmd.execute(config.config_path, config.no_progress).await,
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
        }
    }
}

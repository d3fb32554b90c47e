//! rpcfinder CLI entry point
//!
//! This is the main executable for the RPC class finder. It handles
//! command-line argument parsing, error display, and command execution.
//!
//! The CLI supports commands for looking up and managing RPC mapping data:
//! - `search` - Resolve an RPC class name to its JavaScript implementations
//! - `suggest` - List RPC class names containing a fragment
//! - `stats` - Show row counts, source, and load freshness
//! - `init` - Scaffold rpcfinder.toml and template mapping tables
//! - `config` - Inspect and edit the configuration

use anyhow::Result;
use clap::Parser;
use rpcfinder_cli::cli;
use rpcfinder_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

//! Resolve an RPC class name to its JavaScript implementations.
//!
//! This module provides the `search` command, the reason the tool exists:
//! given a full RPC class name it prints the JavaScript class(es) registered
//! for that class and the file(s) defining them.
//!
//! # Examples
//!
//! Resolve a class, case-insensitively:
//! ```bash
//! rpcfinder search jp.co.testRIclass
//! ```
//!
//! Structured output for scripts:
//! ```bash
//! rpcfinder search jp.co.testRIclass --format json
//! ```
//!
//! Skip the cache and load the tables fresh:
//! ```bash
//! rpcfinder search jp.co.testRIclass --reload
//! ```
//!
//! # Exit Status
//!
//! - `0` - the class resolved, or the query was blank (nothing to search)
//! - `1` - the class or its JavaScript mapping was not found, or the tables
//!   could not be loaded

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{CommandContext, OutputFormat};
use crate::core::FinderError;
use crate::search::SearchResult;

/// Command to resolve one RPC class name.
#[derive(Args)]
pub struct SearchCommand {
    /// Full RPC class name, matched case-insensitively
    query: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Discard the cached tables and load fresh before resolving
    #[arg(long)]
    reload: bool,
}

impl SearchCommand {
    /// Execute the search command.
    ///
    /// A blank query is benign: it prints a notice and succeeds, matching
    /// the "show nothing" behavior callers of the lookup expect. Every other
    /// failure propagates to the error presenter.
    pub async fn execute(self, config_path: Option<PathBuf>, no_progress: bool) -> Result<()> {
        let ctx = CommandContext::new(config_path, no_progress).await?;
        if self.reload {
            ctx.cache.invalidate().await;
        }

        let spinner = ctx.loading_spinner();
        let outcome = ctx.resolver.resolve_exact(&self.query).await;
        spinner.finish_and_clear();

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                if matches!(err.downcast_ref::<FinderError>(), Some(FinderError::EmptyQuery)) {
                    println!("{}", "Nothing to search for: the query is empty".yellow());
                    return Ok(());
                }
                return Err(err);
            }
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Text => print_result(&result),
        }
        Ok(())
    }
}

/// Print one resolution in the human-readable layout.
fn print_result(result: &SearchResult) {
    println!(
        "{} {} {}",
        "✓".green(),
        result.rpc_class.bold(),
        format!("(rpc name: {})", result.rpc_name).dimmed()
    );
    for mapping in &result.js_mappings {
        println!("    {}  {}", mapping.js_class.cyan(), mapping.file_path);
    }
}

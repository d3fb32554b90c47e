//! List RPC class names containing a fragment.
//!
//! The `suggest` command is the companion to `search` for when only part of
//! a class name is known. It prints at most ten candidates, one per line, in
//! table order, matching the fragment case-insensitively.
//!
//! A blank fragment or an unloadable dataset prints nothing and exits 0;
//! suggestions are a best-effort convenience and never fail.
//!
//! ```bash
//! rpcfinder suggest testri
//! rpcfinder suggest testri --format json
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{CommandContext, OutputFormat};

/// Command to list candidate RPC class names.
#[derive(Args)]
pub struct SuggestCommand {
    /// Fragment of an RPC class name, matched case-insensitively
    query: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SuggestCommand {
    /// Execute the suggest command. Never fails on lookup grounds; only a
    /// broken configuration aborts it.
    pub async fn execute(self, config_path: Option<PathBuf>, no_progress: bool) -> Result<()> {
        let ctx = CommandContext::new(config_path, no_progress).await?;

        let spinner = ctx.loading_spinner();
        let suggestions = ctx.resolver.suggest(&self.query).await;
        spinner.finish_and_clear();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
            OutputFormat::Text => {
                for name in &suggestions {
                    println!("{name}");
                }
            }
        }
        Ok(())
    }
}

//! Show dataset statistics.
//!
//! The `stats` command loads (or reuses) the mapping tables and reports
//! where they came from, how many usable rows each contributed, and when the
//! data was last loaded.
//!
//! ```bash
//! rpcfinder stats
//! rpcfinder stats --reload --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{CommandContext, OutputFormat};
use crate::source::TableSource;

/// Command to report dataset statistics.
#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Discard the cached tables and load fresh
    #[arg(long)]
    reload: bool,
}

/// The reported statistics, also the JSON shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetStats {
    /// Where the tables come from
    source: String,
    /// Usable rows in the rpc-mappings table
    rpc_count: usize,
    /// Usable rows in the js-mappings table
    js_count: usize,
    /// RFC 3339 time of the last successful load
    last_loaded: Option<String>,
}

impl StatsCommand {
    /// Execute the stats command.
    pub async fn execute(self, config_path: Option<PathBuf>, no_progress: bool) -> Result<()> {
        let ctx = CommandContext::new(config_path, no_progress).await?;

        let spinner = ctx.loading_spinner();
        let outcome = ctx.cache.get_or_load(self.reload).await;
        spinner.finish_and_clear();
        let data = outcome?;

        let stats = DatasetStats {
            source: ctx.cache.repository().source().describe(),
            rpc_count: data.rpc_count(),
            js_count: data.js_count(),
            last_loaded: ctx.cache.last_loaded().await.map(|at| at.to_rfc3339()),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            OutputFormat::Text => {
                println!("{} {}", "Source:".bold(), stats.source);
                println!("{} {}", "RPC mappings:".bold(), stats.rpc_count);
                println!("{} {}", "JS mappings:".bold(), stats.js_count);
                if let Some(at) = &stats.last_loaded {
                    println!("{} {}", "Last loaded:".bold(), at);
                }
                if data.is_empty() {
                    println!("{}", "The tables loaded but contain no usable rows".yellow());
                }
            }
        }
        Ok(())
    }
}

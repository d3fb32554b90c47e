//! Initialize a directory for rpcfinder.
//!
//! This module provides the `init` command which scaffolds everything the
//! tool needs: a `rpcfinder.toml` pointing at a `data/` directory, and the
//! two mapping tables with their header line plus one sample row. The sample
//! row makes the very first `rpcfinder search` work before any real data is
//! in place.
//!
//! # Examples
//!
//! Initialize the current directory:
//! ```bash
//! rpcfinder init
//! ```
//!
//! Initialize a specific directory:
//! ```bash
//! rpcfinder init --path ./lookup
//! ```
//!
//! Overwrite existing files:
//! ```bash
//! rpcfinder init --force
//! ```
//!
//! # Safety
//!
//! Without `--force` the command refuses to touch an existing
//! `rpcfinder.toml` and leaves existing table files alone.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::config::{CONFIG_FILE_NAME, DEFAULT_DATA_DIR};
use crate::source::TableId;

/// Command to scaffold a config file and template mapping tables.
#[derive(Args)]
pub struct InitCommand {
    /// Directory to initialize (defaults to current directory)
    ///
    /// Created if it does not exist.
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing config file and existing tables
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Fails when `rpcfinder.toml` already exists without `--force`, or on
    /// any filesystem error while creating the scaffold.
    pub async fn execute(self) -> Result<()> {
        let target_dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(anyhow!(
                "{} already exists at {}. Use --force to overwrite",
                CONFIG_FILE_NAME,
                config_path.display()
            ));
        }

        let data_dir = target_dir.join(DEFAULT_DATA_DIR);
        fs::create_dir_all(&data_dir)?;

        let config_template = r#"# rpcfinder configuration
# The mapping tables are read from this directory, relative to this file:

[source]
data_dir = "data"

# Or fetch the tables from an HTTP endpoint instead (mutually exclusive
# with data_dir):
# base_url = "https://mappings.example.com/exports"
"#;
        fs::write(&config_path, config_template)?;

        for table in TableId::ALL {
            let table_path = data_dir.join(table.file_name());
            if table_path.exists() && !self.force {
                println!(
                    "{} Keeping existing {}",
                    "-".dimmed(),
                    table_path.display()
                );
                continue;
            }
            fs::write(&table_path, table_template(table))?;
        }

        println!("{} Initialized {} at {}", "✓".green(), CONFIG_FILE_NAME, config_path.display());
        println!("{} Created template tables under {}", "✓".green(), data_dir.display());

        println!("\n{}", "Next steps:".cyan());
        println!("  Try the sample mapping:");
        println!("    rpcfinder search jp.co.example.ExampleRpcClass");
        println!("\n  Then replace the sample rows in {} with real exports", data_dir.display());

        Ok(())
    }
}

/// Template content for one table: header plus a sample row.
fn table_template(table: TableId) -> &'static str {
    match table {
        TableId::RpcMappings => "rpc_name,rpc_class\nexampleRI,jp.co.example.ExampleRpcClass\n",
        TableId::JsMappings => {
            "rpc_name,js_class,file_path\nexampleRI,ExampleRpcImpl,src/rpc/example.js\n"
        }
    }
}

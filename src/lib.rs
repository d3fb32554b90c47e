//! rpcfinder - RPC class finder
//!
//! A command-line tool that resolves RPC class names to the JavaScript
//! classes and source files implementing them, backed by two CSV mapping
//! tables exported from the RPC registry.
//!
//! # Architecture Overview
//!
//! rpcfinder is a read-only lookup pipeline over two tables:
//!
//! - `rpc-mappings.csv` maps an RPC name to its fully qualified RPC class
//! - `js-mappings.csv` maps an RPC name to a JavaScript class and the file
//!   defining it
//!
//! A query walks the pipeline source → parse → repository → cache →
//! resolver: the raw CSV text comes from a directory or an HTTP endpoint,
//! both tables are loaded concurrently and joined on `rpc_name`, the result
//! is cached for a short freshness window, and the resolver answers exact
//! (case-insensitive) and substring queries against it.
//!
//! ## Key Behaviors
//!
//! - **Case-insensitive exact match**: queries ignore case but results keep
//!   the dataset's casing; the first matching row wins
//! - **One-to-many resolution**: a class implemented by several JavaScript
//!   classes returns all of them in table order
//! - **Freshness window**: repeated lookups within five seconds reuse one
//!   load; `--reload` forces a fresh one
//! - **Forgiving CSV**: quotes are stripped rather than interpreted, short
//!   rows are padded, blank rows are dropped
//!
//! # Core Modules
//!
//! ## Lookup Pipeline
//! - [`csv`] - The forgiving CSV table parser
//! - [`source`] - Table providers: local directory or HTTP endpoint
//! - [`mappings`] - Record types and the two-table loading repository
//! - [`cache`] - Freshness-window caching of the loaded mapping set
//! - [`search`] - Exact resolution and substring suggestions
//!
//! ## Surface
//! - [`cli`] - Command-line interface with subcommands
//! - [`config`] - `rpcfinder.toml` discovery, parsing, and editing
//! - [`core`] - Error types and user-friendly error reporting
//!
//! ## Supporting Modules
//! - [`constants`] - Tuning knobs: freshness window, suggestion cap, retry
//! - [`utils`] - Progress spinner
//!
//! # Configuration (rpcfinder.toml)
//!
//! ```toml
//! [source]
//! # Read the tables from this directory (relative to this file):
//! data_dir = "data"
//!
//! # Or fetch them over HTTP instead (mutually exclusive with data_dir):
//! # base_url = "https://mappings.example.com/exports"
//! ```
//!
//! With no configuration file at all, the tables are read from `data/`
//! under the current directory.
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Scaffold a project with sample tables
//! rpcfinder init
//!
//! # Resolve a class name (case-insensitive)
//! rpcfinder search jp.co.testRIclass
//!
//! # JSON output for scripts
//! rpcfinder search jp.co.testRIclass --format json
//!
//! # Candidates containing a fragment
//! rpcfinder suggest testri
//!
//! # Dataset statistics
//! rpcfinder stats
//!
//! # Point the tool at a different export
//! rpcfinder config set base-url https://mappings.example.com/exports
//! ```

// Lookup pipeline
pub mod cache;
pub mod csv;
pub mod mappings;
pub mod search;
pub mod source;

// Surface
pub mod cli;
pub mod config;
pub mod core;

// Supporting modules
pub mod constants;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Integration test suite for rpcfinder
//!
//! End-to-end tests that drive the compiled binary the way a user would:
//! each test gets an isolated project directory and a private HOME, runs
//! `rpcfinder` as a subprocess, and asserts on its output and exit status.
//! These tests run quickly and are executed in CI on every commit.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! Tests are organized by functionality area:
//! - **config**: Discovery, `config show/get/set/path`, `--global` edits
//! - **error_scenarios**: Error reporting and suggestions
//! - **http_source**: Fetching tables from an HTTP endpoint
//! - **init**: Scaffolding a project
//! - **search**: Exact RPC class resolution
//! - **stats**: Dataset statistics
//! - **suggest**: Partial-name suggestions

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;
#[path = "../fixtures/mod.rs"]
mod fixtures;

// Integration tests
mod config;
mod http_source;

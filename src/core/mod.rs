//! Core types and functionality for rpcfinder
//!
//! This module forms the foundation of rpcfinder's type system. It currently
//! hosts the error handling system; the mapping record types live with their
//! repository in [`crate::mappings`].
//!
//! # Error Management
//!
//! rpcfinder uses an error handling system designed for both developer
//! ergonomics and end-user experience:
//! - **Strongly-typed errors** ([`FinderError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions
//! - **Automatic conversion** from common standard library errors
//!
//! The distinction between error kinds matters to callers: load failures
//! (unavailable or unparseable tables) are retryable, lookup misses are
//! user-facing text, and an empty query is a benign no-op. See
//! [`error`] for the full taxonomy.

pub mod error;

pub use error::{ErrorContext, FinderError, user_friendly_error};

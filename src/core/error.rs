//! Error handling for rpcfinder
//!
//! This module provides the error types and user-friendly error reporting for
//! the RPC class finder. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`FinderError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! Errors fall into three groups that callers handle differently:
//! - **Load failures**: [`FinderError::SourceUnavailable`],
//!   [`FinderError::ParseFailure`] - a mapping table could not be retrieved or
//!   understood; the current load fails, a later retry may succeed, and any
//!   previously cached dataset is left untouched.
//! - **Lookup misses**: [`FinderError::RpcClassNotFound`],
//!   [`FinderError::JsMappingNotFound`] - the dataset loaded fine but the
//!   query matched nothing; shown to the user verbatim, never retried.
//! - **Benign input**: [`FinderError::EmptyQuery`] - a blank search string;
//!   UI layers treat this as "show nothing" rather than an error.
//!
//! Use [`user_friendly_error`] to convert any error into a displayable format
//! with contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rpcfinder_cli::core::{FinderError, user_friendly_error};
//!
//! fn lookup() -> Result<(), FinderError> {
//!     Err(FinderError::RpcClassNotFound { query: "jp.co.example".to_string() })
//! }
//!
//! if let Err(e) = lookup() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::source::TableId;

/// The main error type for rpcfinder operations.
///
/// Each variant represents a specific failure mode. The lookup variants keep
/// the exact message text users of the original tool know ("RPC class not
/// found: …"), while the load variants carry enough context (which table,
/// what went wrong) for a useful suggestion.
#[derive(Error, Debug)]
pub enum FinderError {
    /// A backing mapping table could not be retrieved.
    ///
    /// Raised for a missing file, an unreadable file, a non-success HTTP
    /// status, or a transport error. Fatal for the current load; recoverable
    /// by retrying once the source is back.
    #[error("{table} table unavailable: {reason}")]
    SourceUnavailable {
        /// Which of the two tables failed to load
        table: TableId,
        /// Why the retrieval failed (path or URL plus the underlying cause)
        reason: String,
    },

    /// A mapping table was retrieved but could not be understood.
    ///
    /// Raised when a required column is absent from the table header. The
    /// CSV splitter itself never fails - malformed quoting degrades the
    /// affected line instead - so this is the only structural parse error.
    #[error("failed to parse {table} table: {reason}")]
    ParseFailure {
        /// Which of the two tables failed to parse
        table: TableId,
        /// What was wrong with the table structure
        reason: String,
    },

    /// The caller passed a blank search string.
    ///
    /// A benign condition: UI layers show "no result" instead of an error
    /// and do not log it. Kept as a distinct variant so callers can branch
    /// on it without string matching.
    #[error("search query is empty")]
    EmptyQuery,

    /// No RPC mapping's class name matched the query (case-insensitive).
    #[error("RPC class not found: {query}")]
    RpcClassNotFound {
        /// The query that matched nothing
        query: String,
    },

    /// An RPC mapping matched but no JavaScript mapping shares its RPC name.
    #[error("JavaScript mapping not found for RPC: {rpc_name}")]
    JsMappingNotFound {
        /// The RPC name of the matched mapping
        rpc_name: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration file parsing error
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// `ErrorContext` wraps a [`FinderError`] and adds optional suggestions for
/// resolution and additional details. This is the primary way rpcfinder
/// presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use rpcfinder_cli::core::{FinderError, ErrorContext};
///
/// let context = ErrorContext::new(FinderError::EmptyQuery)
///     .with_suggestion("Pass a (partial) RPC class name to search for");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying finder error
    pub error: FinderError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`FinderError`].
    #[must_use]
    pub const fn new(error: FinderError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions should be actionable steps the user can take. They are
    /// displayed in green in the terminal to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    ///
    /// Details provide context about why the error occurred. They are
    /// displayed in yellow, less prominent than the main error or the
    /// suggestion.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// Prints the error, details, and suggestion using color coding:
    /// red/bold for the error, yellow for details, green for the suggestion.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable
/// suggestions.
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly messages for CLI display. It recognizes [`FinderError`]
/// variants and provides tailored suggestions; anything else gets wrapped
/// with generic context.
///
/// # Examples
///
/// ```rust,no_run
/// use rpcfinder_cli::core::{FinderError, user_friendly_error};
///
/// let error = FinderError::EmptyQuery;
/// let context = user_friendly_error(anyhow::Error::from(error));
/// context.display();
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<FinderError>() {
        Ok(finder_error) => {
            let (suggestion, details) = match &finder_error {
                FinderError::SourceUnavailable { table, .. } => (
                    Some(format!(
                        "Check the configured data location for the {table} table, \
                         or run 'rpcfinder init' to scaffold sample tables"
                    )),
                    Some(
                        "rpcfinder reads data/rpc-mappings.csv and data/js-mappings.csv \
                         relative to the working directory unless rpcfinder.toml says otherwise"
                            .to_string(),
                    ),
                ),
                FinderError::ParseFailure { table, .. } => (
                    Some(format!(
                        "Verify the {table} table's header row ({})",
                        table.expected_header()
                    )),
                    None,
                ),
                FinderError::EmptyQuery => {
                    (Some("Pass a (partial) RPC class name to search for".to_string()), None)
                }
                FinderError::RpcClassNotFound { query } => (
                    Some(format!("Try 'rpcfinder suggest {query}' to list similar class names")),
                    None,
                ),
                FinderError::JsMappingNotFound { rpc_name } => (
                    None,
                    Some(format!(
                        "The rpc-mappings table knows '{rpc_name}' but no row in the \
                         js-mappings table references it"
                    )),
                ),
                FinderError::ConfigError { .. } | FinderError::ConfigParseError { .. } => (
                    Some("Review rpcfinder.toml, or run 'rpcfinder config show' to inspect \
                          the effective configuration"
                        .to_string()),
                    None,
                ),
                _ => (None, None),
            };

            let mut ctx = ErrorContext::new(finder_error);
            if let Some(s) = suggestion {
                ctx = ctx.with_suggestion(s);
            }
            if let Some(d) = details {
                ctx = ctx.with_details(d);
            }
            ctx
        }
        Err(other) => ErrorContext::new(FinderError::Other {
            message: format!("{other:#}"),
        }),
    }
}

//! Shared utilities.
//!
//! # Modules
//!
//! - [`progress`] - Spinner feedback for long-running loads

pub mod progress;

pub use progress::{NO_PROGRESS_ENV, Spinner};

//! Global constants used throughout the rpcfinder codebase.
//!
//! This module contains the cache freshness window, query limits, and HTTP
//! retry parameters that are used across multiple modules. Defining them
//! centrally improves maintainability and makes magic numbers more
//! discoverable.

use std::time::Duration;

/// How long a successfully loaded mapping dataset stays fresh (5 seconds).
///
/// While an entry is younger than this window, `get_or_load(false)` serves it
/// from memory without touching the source tables. The window is deliberately
/// short: the tables are small and editing them while the tool is running is
/// a normal workflow, so staleness beyond a few seconds would be surprising.
pub const CACHE_FRESHNESS_WINDOW: Duration = Duration::from_millis(5000);

/// Maximum number of candidates returned by a suggestion query.
///
/// Suggestions are a typeahead aid, not a result list; the first ten matches
/// in dataset order are enough for that purpose.
pub const SUGGESTION_LIMIT: usize = 10;

/// Starting delay for exponential backoff on HTTP table fetches (10ms).
pub const HTTP_RETRY_BASE_DELAY_MS: u64 = 10;

/// Maximum backoff delay for HTTP table fetches (500ms).
///
/// Backoff delays are capped at this value to prevent excessive wait times
/// during retry operations.
pub const HTTP_RETRY_MAX_DELAY: Duration = Duration::from_millis(500);

/// Number of retry attempts for transient HTTP transport failures.
///
/// Only transport-level failures (connection reset, DNS hiccup) are retried;
/// a server that answers with a non-success status is authoritative and the
/// fetch fails immediately.
pub const HTTP_RETRY_ATTEMPTS: usize = 3;

/// Timeout for a single HTTP table fetch (30 seconds).
pub const HTTP_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

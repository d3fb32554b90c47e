//! Freshness-window caching for the loaded mapping set.
//!
//! Loading the mapping tables costs two fetches plus parsing, and interactive
//! use fires several lookups in quick succession. [`MappingCache`] keeps the
//! most recent [`MappingSet`] and serves it for a short freshness window
//! (5 seconds by default, [`CACHE_FRESHNESS_WINDOW`]) before consulting the
//! source again.
//!
//! # Semantics
//!
//! - At most one entry. A successful load replaces it; a failed load leaves
//!   the slot untouched, so an earlier entry's timestamp stays visible.
//! - `force_reload` bypasses the freshness check for one call.
//! - [`MappingCache::invalidate`] empties the slot unconditionally.
//! - The internal lock is never held across a load. Overlapping callers that
//!   all miss the window each run their own load and each store their
//!   result; last writer wins. Loads are idempotent reads of the source, so
//!   the duplicated work is bounded and the outcome identical.
//!
//! The cache is an ordinary value, owned by whoever constructs it. Share one
//! via [`Arc`] to give several call sites the same window.
//!
//! Data is handed out as `Arc<MappingSet>`; a reload does not invalidate
//! snapshots already held by callers.

use crate::constants::CACHE_FRESHNESS_WINDOW;
use crate::mappings::{MappingRepository, MappingSet};
use crate::source::TableSource;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// One cached load with both timestamps: monotonic for the freshness check,
/// wall clock for display.
#[derive(Debug)]
struct CacheEntry {
    data: Arc<MappingSet>,
    loaded_at: Instant,
    loaded_wall: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, window: Duration) -> bool {
        self.loaded_at.elapsed() < window
    }
}

/// Caches the result of [`MappingRepository::load`] for a freshness window.
#[derive(Debug)]
pub struct MappingCache<S> {
    repository: MappingRepository<S>,
    freshness_window: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<S: TableSource> MappingCache<S> {
    /// Cache with the default freshness window.
    #[must_use]
    pub fn new(repository: MappingRepository<S>) -> Self {
        Self::with_freshness_window(repository, CACHE_FRESHNESS_WINDOW)
    }

    /// Cache with an explicit freshness window. A zero window disables
    /// reuse entirely, which tests rely on.
    #[must_use]
    pub fn with_freshness_window(repository: MappingRepository<S>, window: Duration) -> Self {
        Self {
            repository,
            freshness_window: window,
            entry: RwLock::new(None),
        }
    }

    /// The repository this cache loads through.
    pub const fn repository(&self) -> &MappingRepository<S> {
        &self.repository
    }

    /// The active freshness window.
    #[must_use]
    pub const fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Return the cached mapping set, loading it if absent, expired, or
    /// `force_reload` is set.
    ///
    /// # Errors
    ///
    /// Propagates the repository's load errors. The cached slot is left
    /// unchanged on failure.
    pub async fn get_or_load(&self, force_reload: bool) -> Result<Arc<MappingSet>> {
        if !force_reload {
            let guard = self.entry.read().await;
            if let Some(entry) = guard.as_ref() {
                if entry.is_fresh(self.freshness_window) {
                    tracing::debug!("serving mapping set from cache");
                    return Ok(Arc::clone(&entry.data));
                }
            }
        }

        // Lock released here; the load runs without it.
        tracing::debug!(force_reload, "loading mapping set");
        let data = Arc::new(self.repository.load().await?);

        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            data: Arc::clone(&data),
            loaded_at: Instant::now(),
            loaded_wall: Utc::now(),
        });
        Ok(data)
    }

    /// Discard the cached entry unconditionally.
    pub async fn invalidate(&self) {
        self.entry.write().await.take();
        tracing::debug!("mapping cache invalidated");
    }

    /// Wall-clock time of the most recent successful load, if any.
    pub async fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|entry| entry.loaded_wall)
    }
}

//! Query resolution over the mapping set.
//!
//! [`SearchResolver`] answers the two questions this tool exists for:
//!
//! - [`resolve_exact`](SearchResolver::resolve_exact): given a full RPC class
//!   name, which JavaScript class(es) implement it, and in which file(s)?
//! - [`suggest`](SearchResolver::suggest): given a fragment, which RPC class
//!   names contain it?
//!
//! Resolution is a two-step join. The query is matched case-insensitively
//! against `rpc_class` in the rpc-mappings table; the first matching row in
//! dataset order wins and contributes its `rpc_name`. That name then selects
//! every js-mappings row with the same `rpc_name` (exact, case-sensitive join
//! key), in dataset order. A class implemented by several JavaScript classes
//! yields them all in one [`SearchResult`].
//!
//! Case-insensitive comparison uses Unicode `to_lowercase` on both sides.
//! Returned values keep the dataset's original casing.
//!
//! The resolver owns no data. It reads through a shared
//! [`MappingCache`](crate::cache::MappingCache), so consecutive queries
//! within the freshness window reuse one load. Suggestions deliberately
//! swallow load failures and return an empty list; only exact resolution
//! surfaces errors.

use crate::cache::MappingCache;
use crate::constants::SUGGESTION_LIMIT;
use crate::core::FinderError;
use crate::source::TableSource;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One JavaScript implementation of a resolved RPC class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMatch {
    /// JavaScript class implementing the RPC
    pub js_class: String,
    /// Path of the source file defining the class
    pub file_path: String,
}

/// Successful resolution of an RPC class query.
///
/// `js_mappings` holds every implementation found for the class, in dataset
/// order; it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The matched RPC class, in dataset casing
    pub rpc_class: String,
    /// The RPC name joining the two tables
    pub rpc_name: String,
    /// All JavaScript implementations, in dataset order
    pub js_mappings: Vec<JsMatch>,
}

/// Resolves queries against the cached mapping set.
#[derive(Debug, Clone)]
pub struct SearchResolver<S> {
    cache: Arc<MappingCache<S>>,
}

impl<S: TableSource> SearchResolver<S> {
    /// Resolver reading through `cache`.
    pub const fn new(cache: Arc<MappingCache<S>>) -> Self {
        Self {
            cache,
        }
    }

    /// The cache this resolver reads through.
    #[must_use]
    pub fn cache(&self) -> &Arc<MappingCache<S>> {
        &self.cache
    }

    /// Resolve an exact RPC class name to its JavaScript implementations.
    ///
    /// Matching against `rpc_class` is case-insensitive; among several rows
    /// with the same class the first in dataset order wins. The join to the
    /// js-mappings table is by exact `rpc_name` equality.
    ///
    /// # Errors
    ///
    /// - [`FinderError::EmptyQuery`] when the query is empty or whitespace
    /// - [`FinderError::RpcClassNotFound`] when no row matches
    /// - [`FinderError::JsMappingNotFound`] when the matched row's `rpc_name`
    ///   has no implementation in the js-mappings table
    /// - any load error from the underlying cache and source
    pub async fn resolve_exact(&self, query: &str) -> Result<SearchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(FinderError::EmptyQuery.into());
        }

        let data = self.cache.get_or_load(false).await?;
        let needle = trimmed.to_lowercase();

        let mapping = data
            .rpc_mappings
            .iter()
            .find(|mapping| mapping.rpc_class.to_lowercase() == needle)
            .ok_or_else(|| FinderError::RpcClassNotFound {
                query: trimmed.to_string(),
            })?;

        let js_mappings: Vec<JsMatch> = data
            .js_mappings
            .iter()
            .filter(|js| js.rpc_name == mapping.rpc_name)
            .map(|js| JsMatch {
                js_class: js.js_class.clone(),
                file_path: js.file_path.clone(),
            })
            .collect();

        if js_mappings.is_empty() {
            return Err(FinderError::JsMappingNotFound {
                rpc_name: mapping.rpc_name.clone(),
            }
            .into());
        }

        tracing::debug!(
            "resolved {} to {} implementation(s) via rpc name {}",
            mapping.rpc_class,
            js_mappings.len(),
            mapping.rpc_name
        );
        Ok(SearchResult {
            rpc_class: mapping.rpc_class.clone(),
            rpc_name: mapping.rpc_name.clone(),
            js_mappings,
        })
    }

    /// Suggest RPC class names containing the query as a case-insensitive
    /// substring.
    ///
    /// Returns at most [`SUGGESTION_LIMIT`] names in dataset order, without
    /// deduplication. A blank query or a failed load yields an empty list;
    /// suggestions never fail.
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let data = match self.cache.get_or_load(false).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("suggestions unavailable, mapping tables failed to load: {err:#}");
                return Vec::new();
            }
        };

        let needle = trimmed.to_lowercase();
        data.rpc_mappings
            .iter()
            .filter(|mapping| mapping.rpc_class.to_lowercase().contains(&needle))
            .take(SUGGESTION_LIMIT)
            .map(|mapping| mapping.rpc_class.clone())
            .collect()
    }
}

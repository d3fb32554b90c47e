//! Mapping records and the repository that loads them.
//!
//! Two tables drive every lookup:
//!
//! - `rpc-mappings`: RPC name to fully qualified RPC class
//! - `js-mappings`: RPC name to JavaScript class and source file path
//!
//! [`MappingRepository`] is the only reader. One [`MappingRepository::load`]
//! call fetches both tables concurrently from its [`TableSource`], parses
//! them, checks the required columns are present, and keeps the rows whose
//! required fields are all non-empty. The result is a [`MappingSet`]: plain
//! owned records in source order, ready for the cache and resolver above.
//!
//! A load either produces a complete set or fails; there is no partially
//! populated state. If one table fails to fetch, the whole load reports that
//! failure.
//!
//! Records serialize in camelCase (`rpcName`, `jsClass`, `filePath`), the
//! field names the JSON output has always used.

use crate::core::FinderError;
use crate::csv::{Table, parse_table};
use crate::source::{TableId, TableSource};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One row of the `rpc-mappings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcMapping {
    /// Short RPC name, the join key into the js-mappings table
    pub rpc_name: String,
    /// Fully qualified RPC class, what users search by
    pub rpc_class: String,
}

/// One row of the `js-mappings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMapping {
    /// Short RPC name this implementation belongs to
    pub rpc_name: String,
    /// JavaScript class implementing the RPC
    pub js_class: String,
    /// Path of the source file defining the class
    pub file_path: String,
}

/// Both mapping tables after parsing and filtering, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSet {
    /// Rows of the rpc-mappings table
    pub rpc_mappings: Vec<RpcMapping>,
    /// Rows of the js-mappings table
    pub js_mappings: Vec<JsMapping>,
}

impl MappingSet {
    /// Number of usable rpc-mapping rows.
    #[must_use]
    pub fn rpc_count(&self) -> usize {
        self.rpc_mappings.len()
    }

    /// Number of usable js-mapping rows.
    #[must_use]
    pub fn js_count(&self) -> usize {
        self.js_mappings.len()
    }

    /// True when neither table produced any usable rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rpc_mappings.is_empty() && self.js_mappings.is_empty()
    }
}

/// Loads and validates the mapping tables from a [`TableSource`].
///
/// The repository is stateless; callers wanting reuse of loaded data wrap it
/// in [`MappingCache`](crate::cache::MappingCache).
#[derive(Debug, Clone)]
pub struct MappingRepository<S> {
    source: S,
}

impl<S: TableSource> MappingRepository<S> {
    /// Create a repository reading from `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
        }
    }

    /// The underlying table source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, parse, and filter both mapping tables.
    ///
    /// The two fetches run concurrently; the first failure aborts the load.
    /// Each table must carry its required columns in the header
    /// ([`TableId::required_columns`]), otherwise the load fails with
    /// [`FinderError::ParseFailure`]. Rows missing a required value are
    /// dropped; surviving rows keep their source order.
    ///
    /// # Errors
    ///
    /// [`FinderError::SourceUnavailable`] if a table cannot be fetched,
    /// [`FinderError::ParseFailure`] if a required column is absent.
    pub async fn load(&self) -> Result<MappingSet> {
        let (rpc_text, js_text) = futures::future::try_join(
            self.source.fetch(TableId::RpcMappings),
            self.source.fetch(TableId::JsMappings),
        )
        .await?;

        let rpc_table = parse_checked(TableId::RpcMappings, &rpc_text)?;
        let js_table = parse_checked(TableId::JsMappings, &js_text)?;

        let set = MappingSet {
            rpc_mappings: rpc_rows(&rpc_table),
            js_mappings: js_rows(&js_table),
        };
        tracing::debug!(
            "loaded {} rpc mappings and {} js mappings",
            set.rpc_count(),
            set.js_count()
        );
        Ok(set)
    }
}

/// Parse one table and verify its required columns are present.
fn parse_checked(table: TableId, text: &str) -> Result<Table> {
    let parsed = parse_table(text);
    let missing: Vec<&str> = table
        .required_columns()
        .iter()
        .copied()
        .filter(|column| !parsed.headers.iter().any(|header| header == column))
        .collect();

    if missing.is_empty() {
        Ok(parsed)
    } else {
        Err(FinderError::ParseFailure {
            table,
            reason: format!("missing required columns: {}", missing.join(", ")),
        }
        .into())
    }
}

fn rpc_rows(table: &Table) -> Vec<RpcMapping> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let rpc_name = row.get("rpc_name")?;
            let rpc_class = row.get("rpc_class")?;
            if rpc_name.is_empty() || rpc_class.is_empty() {
                return None;
            }
            Some(RpcMapping {
                rpc_name: rpc_name.to_string(),
                rpc_class: rpc_class.to_string(),
            })
        })
        .collect()
}

fn js_rows(table: &Table) -> Vec<JsMapping> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let rpc_name = row.get("rpc_name")?;
            let js_class = row.get("js_class")?;
            let file_path = row.get("file_path")?;
            if rpc_name.is_empty() || js_class.is_empty() || file_path.is_empty() {
                return None;
            }
            Some(JsMapping {
                rpc_name: rpc_name.to_string(),
                js_class: js_class.to_string(),
                file_path: file_path.to_string(),
            })
        })
        .collect()
}

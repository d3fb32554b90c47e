//! Table sources: where the raw CSV text comes from.
//!
//! The lookup pipeline is source-agnostic. Everything above this module works
//! on CSV text and does not care whether that text came from a directory on
//! disk or an HTTP endpoint. The [`TableSource`] trait is that seam, with two
//! implementations:
//!
//! - [`FsTableSource`] reads `<data_dir>/<table>.csv` via `tokio::fs`
//! - [`HttpTableSource`] fetches `<base_url>/<table>.csv` via `reqwest`,
//!   retrying transient transport failures with exponential backoff
//!
//! [`ConfiguredSource`] is the runtime dispatch between the two, chosen by
//! the `[source]` section of `rpcfinder.toml`.
//!
//! Both tables are identified by [`TableId`], which also owns the table
//! naming scheme: file names, required columns, and the header line shown in
//! parse-failure suggestions.

use crate::constants::{
    HTTP_FETCH_TIMEOUT, HTTP_RETRY_ATTEMPTS, HTTP_RETRY_BASE_DELAY_MS, HTTP_RETRY_MAX_DELAY,
};
use crate::core::FinderError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;

/// Identifier for one of the two mapping tables.
///
/// The variants carry the full naming scheme so that sources, errors, and
/// the `init` scaffolder all agree on file names and required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// RPC name to fully qualified RPC class
    RpcMappings,
    /// RPC name to JavaScript class and source file path
    JsMappings,
}

impl TableId {
    /// Both tables, in load order.
    pub const ALL: [Self; 2] = [Self::RpcMappings, Self::JsMappings];

    /// Stable short name used in logs, errors, and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RpcMappings => "rpc-mappings",
            Self::JsMappings => "js-mappings",
        }
    }

    /// File name of this table under a data directory or base URL.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Columns that must be present in the header line.
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::RpcMappings => &["rpc_name", "rpc_class"],
            Self::JsMappings => &["rpc_name", "js_class", "file_path"],
        }
    }

    /// The header line a well-formed table starts with.
    #[must_use]
    pub const fn expected_header(self) -> &'static str {
        match self {
            Self::RpcMappings => "rpc_name,rpc_class",
            Self::JsMappings => "rpc_name,js_class,file_path",
        }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider of raw CSV text for the mapping tables.
///
/// Implementations return the table body as text; parsing and validation
/// happen upstream. `fetch` is invoked concurrently for both tables, so the
/// returned future must be `Send`.
pub trait TableSource: Send + Sync {
    /// Fetch the raw text of one table.
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Human-readable description of where tables come from, for status
    /// output and spinner messages.
    fn describe(&self) -> String;
}

/// Reads mapping tables from CSV files in a local directory.
#[derive(Debug, Clone)]
pub struct FsTableSource {
    data_dir: PathBuf,
}

impl FsTableSource {
    /// Create a source rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory the tables are read from.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of one table file.
    #[must_use]
    pub fn path_for(&self, table: TableId) -> PathBuf {
        self.data_dir.join(table.file_name())
    }
}

impl TableSource for FsTableSource {
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send {
        let path = self.path_for(table);
        async move {
            tracing::debug!("reading {table} table from {}", path.display());
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => Ok(text),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    Err(FinderError::SourceUnavailable {
                        table,
                        reason: format!("{} does not exist", path.display()),
                    }
                    .into())
                }
                Err(err) => Err(FinderError::SourceUnavailable {
                    table,
                    reason: format!("failed to read {}: {err}", path.display()),
                }
                .into()),
            }
        }
    }

    fn describe(&self) -> String {
        format!("directory {}", self.data_dir.display())
    }
}

/// Fetches mapping tables over HTTP from a fixed base URL.
///
/// Transport failures (connection refused, timeouts) are retried with
/// exponential backoff; an HTTP error status is reported immediately without
/// retrying, since the server has already answered.
#[derive(Debug, Clone)]
pub struct HttpTableSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTableSource {
    /// Create a source fetching from `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL tables are fetched under.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of one table file.
    #[must_use]
    pub fn table_url(&self, table: TableId) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), table.file_name())
    }
}

impl TableSource for HttpTableSource {
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send {
        let url = self.table_url(table);
        let client = self.client.clone();
        async move {
            tracing::debug!("fetching {table} table from {url}");

            let strategy = ExponentialBackoff::from_millis(HTTP_RETRY_BASE_DELAY_MS)
                .max_delay(HTTP_RETRY_MAX_DELAY)
                .take(HTTP_RETRY_ATTEMPTS);

            let request_url = url.clone();
            let response = Retry::spawn(strategy, move || {
                let client = client.clone();
                let url = request_url.clone();
                async move { client.get(&url).timeout(HTTP_FETCH_TIMEOUT).send().await }
            })
            .await
            .map_err(|err| FinderError::SourceUnavailable {
                table,
                reason: format!("request to {url} failed: {err}"),
            })?;

            if !response.status().is_success() {
                return Err(FinderError::SourceUnavailable {
                    table,
                    reason: format!("{url} returned HTTP {}", response.status()),
                }
                .into());
            }

            response.text().await.map_err(|err| {
                FinderError::SourceUnavailable {
                    table,
                    reason: format!("failed to read body from {url}: {err}"),
                }
                .into()
            })
        }
    }

    fn describe(&self) -> String {
        format!("base URL {}", self.base_url)
    }
}

/// The table source selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    /// Local CSV files under a data directory
    Fs(FsTableSource),
    /// Remote CSV files under an HTTP base URL
    Http(HttpTableSource),
}

impl TableSource for ConfiguredSource {
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send {
        async move {
            match self {
                Self::Fs(source) => source.fetch(table).await,
                Self::Http(source) => source.fetch(table).await,
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Fs(source) => source.describe(),
            Self::Http(source) => source.describe(),
        }
    }
}

impl From<FsTableSource> for ConfiguredSource {
    fn from(source: FsTableSource) -> Self {
        Self::Fs(source)
    }
}

impl From<HttpTableSource> for ConfiguredSource {
    fn from(source: HttpTableSource) -> Self {
        Self::Http(source)
    }
}

//! Test utilities for rpcfinder.
//!
//! Available to unit tests and, via the `test-utils` feature, to the
//! integration and stress suites. Provides an in-memory [`TableSource`] with
//! fetch counting plus one-time logging initialization for tests.

use crate::core::FinderError;
use crate::source::{FsTableSource, TableId, TableSource};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Canonical rpc-mappings fixture: two classes, unique names.
pub const RPC_TABLE_BASIC: &str = "rpc_name,rpc_class\n\
                                   testRI,jp.co.testRIclass\n\
                                   anotherRI,jp.co.anotherRIclass\n";

/// Matching js-mappings fixture: one implementation per rpc name.
pub const JS_TABLE_BASIC: &str = "rpc_name,js_class,file_path\n\
                                  testRI,TestRIImpl,src/rpc/testRI.js\n\
                                  anotherRI,AnotherRIImpl,src/rpc/anotherRI.js\n";

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// Pass a level to force one, or `None` to respect `RUST_LOG` (no logging if
/// the variable is unset).
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// In-memory [`TableSource`] for tests.
///
/// Holds per-table text that can be swapped mid-test and counts how often
/// each table is fetched, so cache tests can assert exactly when the source
/// was consulted. A table marked missing reports
/// [`FinderError::SourceUnavailable`] like a real source would.
///
/// Clones share the same tables and counters.
#[derive(Debug, Clone, Default)]
pub struct StaticTableSource {
    tables: Arc<Mutex<HashMap<TableId, String>>>,
    fetches: Arc<Mutex<HashMap<TableId, usize>>>,
}

impl StaticTableSource {
    /// Source serving the given text for both tables.
    #[must_use]
    pub fn new(rpc_text: &str, js_text: &str) -> Self {
        let source = Self::default();
        source.set_table(TableId::RpcMappings, rpc_text);
        source.set_table(TableId::JsMappings, js_text);
        source
    }

    /// Mark one table as absent so fetching it fails.
    #[must_use]
    pub fn with_missing_table(self, table: TableId) -> Self {
        self.remove_table(table);
        self
    }

    /// Replace the text served for one table.
    pub fn set_table(&self, table: TableId, text: &str) {
        self.tables.lock().unwrap().insert(table, text.to_string());
    }

    /// Drop one table mid-test so later fetches of it fail.
    pub fn remove_table(&self, table: TableId) {
        self.tables.lock().unwrap().remove(&table);
    }

    /// How many times one table has been fetched.
    #[must_use]
    pub fn fetches(&self, table: TableId) -> usize {
        self.fetches.lock().unwrap().get(&table).copied().unwrap_or(0)
    }

    /// Total fetches across both tables.
    #[must_use]
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

/// Temporary on-disk data directory holding CSV table files.
///
/// The directory is deleted when the value drops. Useful wherever a test
/// needs a real [`FsTableSource`] rather than the in-memory stub.
#[derive(Debug)]
pub struct TestDataDir {
    temp: TempDir,
}

impl TestDataDir {
    /// Empty data directory.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    /// Data directory pre-populated with the basic fixtures.
    pub fn with_basic_tables() -> Result<Self> {
        let dir = Self::empty()?;
        dir.write_table(TableId::RpcMappings, RPC_TABLE_BASIC)?;
        dir.write_table(TableId::JsMappings, JS_TABLE_BASIC)?;
        Ok(dir)
    }

    /// Write (or overwrite) one table file.
    pub fn write_table(&self, table: TableId, text: &str) -> Result<()> {
        std::fs::write(self.path().join(table.file_name()), text)?;
        Ok(())
    }

    /// Delete one table file.
    pub fn delete_table(&self, table: TableId) -> Result<()> {
        std::fs::remove_file(self.path().join(table.file_name()))?;
        Ok(())
    }

    /// Root of the data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// A filesystem source reading from this directory.
    #[must_use]
    pub fn fs_source(&self) -> FsTableSource {
        FsTableSource::new(self.path())
    }
}

impl TableSource for StaticTableSource {
    fn fetch(&self, table: TableId) -> impl std::future::Future<Output = Result<String>> + Send {
        *self.fetches.lock().unwrap().entry(table).or_insert(0) += 1;
        let result = match self.tables.lock().unwrap().get(&table) {
            Some(text) => Ok(text.clone()),
            None => Err(FinderError::SourceUnavailable {
                table,
                reason: format!("test source has no {table} table"),
            }
            .into()),
        };
        async move { result }
    }

    fn describe(&self) -> String {
        "in-memory test tables".to_string()
    }
}

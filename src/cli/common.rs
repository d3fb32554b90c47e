//! Common utilities for CLI commands

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::MappingCache;
use crate::config::LoadedConfig;
use crate::mappings::MappingRepository;
use crate::search::SearchResolver;
use crate::source::{ConfiguredSource, TableSource};
use crate::utils::Spinner;

/// Output format for commands that support structured output.
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors and formatting
    Text,
    /// JSON output for automation and integration
    Json,
}

/// Common context for commands that query the mapping tables.
///
/// Bundles the discovered configuration with the cache and resolver built
/// from it. One context means one cache, so consecutive operations inside a
/// command share a single load.
#[derive(Debug)]
pub struct CommandContext {
    /// Discovered configuration and its origin
    pub config: LoadedConfig,
    /// Freshness-window cache over the configured source
    pub cache: Arc<MappingCache<ConfiguredSource>>,
    /// Resolver reading through [`Self::cache`]
    pub resolver: SearchResolver<ConfiguredSource>,
    no_progress: bool,
}

impl CommandContext {
    /// Discover configuration and wire up the lookup pipeline.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named config file is missing or when the
    /// discovered file does not parse or validate.
    pub async fn new(config_path: Option<PathBuf>, no_progress: bool) -> Result<Self> {
        let config = LoadedConfig::discover(config_path).await?;
        let source = config.source();
        tracing::debug!("mapping tables come from {}", source.describe());

        let cache = Arc::new(MappingCache::new(MappingRepository::new(source)));
        let resolver = SearchResolver::new(Arc::clone(&cache));

        Ok(Self {
            config,
            cache,
            resolver,
            no_progress,
        })
    }

    /// Spinner for the table-loading phase.
    ///
    /// Suppressed when `--no-progress` was given. Finish it before printing
    /// any result.
    #[must_use]
    pub fn loading_spinner(&self) -> Spinner {
        let source = self.cache.repository().source();
        Spinner::new(
            format!("Loading mapping tables from {}", source.describe()),
            self.no_progress,
        )
    }
}

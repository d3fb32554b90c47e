//! Configuration for rpcfinder.
//!
//! Configuration lives in an optional `rpcfinder.toml`. Its single concern
//! is where the mapping tables come from:
//!
//! ```toml
//! [source]
//! # Read rpc-mappings.csv / js-mappings.csv from this directory.
//! data_dir = "data"
//!
//! # Or fetch them from an HTTP endpoint instead:
//! # base_url = "https://mappings.example.com/exports"
//! ```
//!
//! `data_dir` and `base_url` are mutually exclusive. With neither set (or no
//! config file at all) the tool reads `data/` next to the config file, or
//! under the current directory when running configless.
//!
//! # Discovery
//!
//! The file is located in this order:
//!
//! 1. explicit `--config <path>` flag
//! 2. `RPCFINDER_CONFIG` environment variable
//! 3. walking up from the current directory looking for `rpcfinder.toml`
//! 4. the user-level `~/.rpcfinder/config.toml`
//!
//! A missing file is not an error; defaults apply. Relative paths in a
//! file resolve against the file's own directory, so a checked-in config
//! works from any subdirectory of the project.
//!
//! Edits made through [`set_value`] go through `toml_edit` and preserve the
//! file's formatting and comments.

use crate::core::FinderError;
use crate::source::{ConfiguredSource, FsTableSource, HttpTableSource};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use toml_edit::DocumentMut;

/// Name of the configuration file searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "rpcfinder.toml";

/// Environment variable overriding configuration discovery.
pub const CONFIG_PATH_ENV: &str = "RPCFINDER_CONFIG";

/// Data directory used when the configuration names none.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Contents of `rpcfinder.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Where the mapping tables come from
    #[serde(default, skip_serializing_if = "SourceConfig::is_unset")]
    pub source: SourceConfig,
}

/// The `[source]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the CSV tables; mutually exclusive with `base_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// HTTP base URL serving the CSV tables; mutually exclusive with `data_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl SourceConfig {
    fn is_unset(&self) -> bool {
        self.data_dir.is_none() && self.base_url.is_none()
    }
}

impl FinderConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`FinderError::TomlError`] on invalid TOML, [`FinderError::ConfigError`]
    /// when both source locations are set.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(FinderError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse, or sets both
    /// source locations.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).map_err(|err| FinderError::ConfigParseError {
                file: path.display().to_string(),
                reason: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration as pretty TOML, creating parent directories.
    ///
    /// Used for scaffolding; edits to existing files should go through
    /// [`set_value`] instead to keep user formatting.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Check the mutual-exclusion rule on the `[source]` table.
    pub fn validate(&self) -> Result<()> {
        if self.source.data_dir.is_some() && self.source.base_url.is_some() {
            return Err(FinderError::ConfigError {
                message: "source.data_dir and source.base_url are mutually exclusive; \
                          configure only one"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Read one source key's current value.
    #[must_use]
    pub fn get(&self, key: SourceKey) -> Option<&str> {
        match key {
            SourceKey::DataDir => self.source.data_dir.as_deref(),
            SourceKey::BaseUrl => self.source.base_url.as_deref(),
        }
    }
}

/// Configuration keys addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKey {
    /// `source.data_dir`
    DataDir,
    /// `source.base_url`
    BaseUrl,
}

impl SourceKey {
    /// TOML key inside the `[source]` table.
    #[must_use]
    pub const fn toml_key(self) -> &'static str {
        match self {
            Self::DataDir => "data_dir",
            Self::BaseUrl => "base_url",
        }
    }

    /// The key this one excludes.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::DataDir => Self::BaseUrl,
            Self::BaseUrl => Self::DataDir,
        }
    }
}

impl FromStr for SourceKey {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data-dir" => Ok(Self::DataDir),
            "base-url" => Ok(Self::BaseUrl),
            other => Err(FinderError::ConfigError {
                message: format!("unknown config key '{other}' (expected data-dir or base-url)"),
            }),
        }
    }
}

impl std::fmt::Display for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataDir => f.write_str("data-dir"),
            Self::BaseUrl => f.write_str("base-url"),
        }
    }
}

/// A discovered configuration: the parsed file plus where it came from.
///
/// `base_dir` anchors relative paths: the config file's directory when a
/// file was found, the current directory otherwise.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Parsed configuration, defaults if no file was found
    pub config: FinderConfig,
    /// Path of the loaded file, `None` when running on defaults
    pub path: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    /// Discover and load configuration.
    ///
    /// `explicit` wins over the `RPCFINDER_CONFIG` environment variable,
    /// which wins over the upward search. An explicitly named file must
    /// exist; an absent discovered file falls back to defaults.
    pub async fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        match resolve_config_path(explicit)? {
            Some(path) => Self::from_file(path).await,
            None => {
                let base_dir = std::env::current_dir()
                    .context("cannot determine current working directory")?;
                tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                Ok(Self {
                    config: FinderConfig::default(),
                    path: None,
                    base_dir,
                })
            }
        }
    }

    /// Load from a known file path.
    pub async fn from_file(path: PathBuf) -> Result<Self> {
        let config = FinderConfig::load_from(&path).await?;
        let base_dir =
            path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(Self {
            config,
            path: Some(path),
            base_dir,
        })
    }

    /// Build the table source this configuration selects.
    ///
    /// `base_url` wins when set; otherwise the data directory, tilde-expanded
    /// and joined to [`Self::base_dir`] when relative.
    #[must_use]
    pub fn source(&self) -> ConfiguredSource {
        if let Some(url) = &self.config.source.base_url {
            return HttpTableSource::new(url.clone()).into();
        }

        let raw = self.config.source.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR);
        let expanded = shellexpand::tilde(raw);
        let mut dir = PathBuf::from(expanded.as_ref());
        if dir.is_relative() {
            dir = self.base_dir.join(dir);
        }
        FsTableSource::new(dir).into()
    }
}

/// Resolve which config file to load, if any.
fn resolve_config_path(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(FinderError::ConfigError {
            message: format!("config file {} does not exist", path.display()),
        }
        .into());
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        if !env_path.trim().is_empty() {
            let path = PathBuf::from(env_path);
            if path.is_file() {
                return Ok(Some(path));
            }
            return Err(FinderError::ConfigError {
                message: format!(
                    "{CONFIG_PATH_ENV} points to {} which does not exist",
                    path.display()
                ),
            }
            .into());
        }
    }

    let current = std::env::current_dir().context("cannot determine current working directory")?;
    if let Some(found) = find_config_from(current) {
        return Ok(Some(found));
    }
    Ok(user_config_path().filter(|path| path.is_file()))
}

/// Path of the user-level configuration file, `~/.rpcfinder/config.toml`.
///
/// `None` when the home directory cannot be determined.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rpcfinder").join("config.toml"))
}

/// The file a configuration edit should target.
///
/// Explicit path first, then the `RPCFINDER_CONFIG` override, then the
/// nearest project file walking up from the current directory, finally
/// `rpcfinder.toml` in the current directory (created on write). The
/// user-level file is never picked implicitly; edits to it are opt-in
/// through `config set --global`.
#[must_use]
pub fn edit_target(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        if !env_path.trim().is_empty() {
            return PathBuf::from(env_path);
        }
    }
    std::env::current_dir()
        .ok()
        .and_then(find_config_from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Walk up from `start` looking for the config file.
fn find_config_from(mut start: PathBuf) -> Option<PathBuf> {
    loop {
        let candidate = start.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !start.pop() {
            return None;
        }
    }
}

/// Set one source key in `rpcfinder.toml`, preserving formatting and
/// comments. Creates the file if it does not exist. Setting a key clears its
/// counterpart so the file stays valid.
pub async fn set_value(path: &Path, key: SourceKey, value: &str) -> Result<()> {
    let text = if path.is_file() {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config from {}", path.display()))?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = text.parse().map_err(|err: toml_edit::TomlError| {
        FinderError::ConfigParseError {
            file: path.display().to_string(),
            reason: err.to_string(),
        }
    })?;

    let source = doc
        .entry("source")
        .or_insert(toml_edit::Item::Table(toml_edit::Table::new()));
    let table = source.as_table_mut().ok_or_else(|| FinderError::ConfigError {
        message: "[source] exists but is not a table".to_string(),
    })?;

    table.insert(key.toml_key(), toml_edit::value(value));
    table.remove(key.counterpart().toml_key());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, doc.to_string())
        .await
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    tracing::debug!("set {key} in {}", path.display());
    Ok(())
}

//! Sync configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_CHUNK_SIZE;

/// How files present on both sides are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompareStrategy {
    /// Size and modification time only. Never reads file content.
    #[default]
    Fast,
    /// Full-content digest of both files.
    Exact,
}

/// Source and destination roots of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSettings {
    /// Tree that is read from.
    pub source: PathBuf,
    /// Tree that is made to match the source.
    pub destination: PathBuf,
}

impl FolderSettings {
    /// Create folder settings from two root paths.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Configuration for a repeating sync.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SyncConfig {
    /// Root that is read from.
    pub source: PathBuf,

    /// Root that is written to.
    pub destination: PathBuf,

    /// Comparison used for files present on both sides.
    #[builder(default)]
    #[serde(default)]
    pub strategy: CompareStrategy,

    /// Seconds to wait between passes.
    #[builder(default = "60")]
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Read buffer size for the exact strategy.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// File that receives the action log.
    #[builder(default)]
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl SyncConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.source {
            Some(ref source) if source.as_os_str().is_empty() => {
                return Err("Source path cannot be empty".to_string());
            }
            None => return Err("Source path is required".to_string()),
            _ => {}
        }
        match self.destination {
            Some(ref destination) if destination.as_os_str().is_empty() => {
                return Err("Destination path cannot be empty".to_string());
            }
            None => return Err("Destination path is required".to_string()),
            _ => {}
        }
        if self.interval_secs == Some(0) {
            return Err("Interval must be at least one second".to_string());
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Create a new sync config builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Create a config with defaults for everything but the roots.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            strategy: CompareStrategy::Fast,
            interval_secs: default_interval_secs(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_file: None,
        }
    }

    /// Roots of this config.
    pub fn folder_settings(&self) -> FolderSettings {
        FolderSettings::new(&self.source, &self.destination)
    }

    /// Interval between passes.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs)
    }
}

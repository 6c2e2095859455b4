//! Core types and traits for mirrorsync.
//!
//! This crate provides the data structures shared by the walker, the
//! comparators and the executor: directory levels, sync actions, folder
//! settings and the error taxonomy.

mod action;
mod compare;
mod config;
mod error;
mod level;

pub use action::{ActionKind, SyncAction};
pub use compare::ContentComparator;
pub use config::{CompareStrategy, FolderSettings, SyncConfig, SyncConfigBuilder};
pub use error::{ErrorCategory, SyncError};
pub use level::{DirectoryLevel, EntrySet};

/// Default read buffer for streaming digests (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

//! Error types for sync passes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while diffing or applying a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Source root is not an existing directory.
    #[error("Source path does not exist: {path}")]
    SourcePathDoesNotExist { path: PathBuf },

    /// Destination root is not an existing directory.
    #[error("Destination path does not exist: {path}")]
    DestinationPathDoesNotExist { path: PathBuf },

    /// Source and destination resolve to the same directory.
    #[error("Source and destination are the same directory: {path}")]
    SourceAndDestinationAreEquals { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Source file or destination parent directory missing during a copy.
    #[error("File or directory not found while copying {path}")]
    FileOrDirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// OS error while copying a file, other than a missing path.
    #[error("Error copying file {path}: {source}")]
    ErrorOnCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copy target resolved to a path under the source root.
    #[error("Copy blocked, path is inside source: {path}")]
    BlockCopyOnSource { path: PathBuf },

    /// Target resolved to a path outside the destination root.
    #[error("Path escapes destination: {path}")]
    PathOutsideDestination { path: PathBuf },

    /// Target of a file delete is not an existing regular file.
    #[error("File not found on delete: {path}")]
    FileNotFoundOnDelete { path: PathBuf },

    /// File delete resolved to a path under the source root.
    #[error("Delete blocked, path is inside source: {path}")]
    BlockDeleteOnSource { path: PathBuf },

    /// OS error while removing a file.
    #[error("Error deleting file {path}: {source}")]
    ErrorOnDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Folder creation resolved to a path under the source root.
    #[error("Create folder blocked, path is inside source: {path}")]
    BlockCreateFolderOnSource { path: PathBuf },

    /// Folder already exists or its parent is missing.
    #[error("Error creating folder {path}: {source}")]
    ErrorOnCreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Folder delete resolved to the destination root or above it.
    #[error("Delete of destination root blocked: {path}")]
    BlockDeleteOfDestinationFolder { path: PathBuf },

    /// Target of a folder delete is not an existing directory.
    #[error("Folder not found on delete: {path}")]
    FolderNotFoundOnDelete { path: PathBuf },

    /// OS error while recursively removing a folder.
    #[error("Error deleting folder {path}: {source}")]
    ErrorOnDeleteFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading a tree or comparing files.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse grouping of [`SyncError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ErrorCategory {
    /// Roots are unusable; fatal to the pass.
    Configuration,
    /// Expected state was not found for a single action.
    Precondition,
    /// A safety guard refused the action.
    Guard,
    /// Underlying filesystem failure.
    Io,
}

impl SyncError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourcePathDoesNotExist { .. }
            | Self::DestinationPathDoesNotExist { .. }
            | Self::SourceAndDestinationAreEquals { .. }
            | Self::InvalidConfig { .. } => ErrorCategory::Configuration,
            Self::FileOrDirectoryNotFound { .. }
            | Self::FileNotFoundOnDelete { .. }
            | Self::ErrorOnCreateFolder { .. }
            | Self::FolderNotFoundOnDelete { .. } => ErrorCategory::Precondition,
            Self::BlockDeleteOnSource { .. }
            | Self::BlockCreateFolderOnSource { .. }
            | Self::BlockDeleteOfDestinationFolder { .. }
            | Self::BlockCopyOnSource { .. }
            | Self::PathOutsideDestination { .. } => ErrorCategory::Guard,
            Self::ErrorOnCopy { .. }
            | Self::ErrorOnDelete { .. }
            | Self::ErrorOnDeleteFolder { .. }
            | Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Path the error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InvalidConfig { .. } => None,
            Self::SourcePathDoesNotExist { path }
            | Self::DestinationPathDoesNotExist { path }
            | Self::SourceAndDestinationAreEquals { path }
            | Self::FileOrDirectoryNotFound { path, .. }
            | Self::ErrorOnCopy { path, .. }
            | Self::BlockCopyOnSource { path }
            | Self::PathOutsideDestination { path }
            | Self::FileNotFoundOnDelete { path }
            | Self::BlockDeleteOnSource { path }
            | Self::ErrorOnDelete { path, .. }
            | Self::BlockCreateFolderOnSource { path }
            | Self::ErrorOnCreateFolder { path, .. }
            | Self::BlockDeleteOfDestinationFolder { path }
            | Self::FolderNotFoundOnDelete { path }
            | Self::ErrorOnDeleteFolder { path, .. }
            | Self::Io { path, .. } => Some(path.as_path()),
        }
    }
}

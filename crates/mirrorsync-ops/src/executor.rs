//! Applies sync actions to the destination tree.

use std::fs::{self, File, FileTimes};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mirrorsync_core::{ActionKind, FolderSettings, SyncAction, SyncError};

use crate::path::resolve_under;

/// Executes single actions against validated source and destination roots.
///
/// All paths handed to the operations are relative to the roots. They are
/// joined lexically, then their parent directory is resolved on disk before
/// any guard runs, so a symlink inside the destination cannot lead into the
/// source. Nothing under the source root is ever written or removed, and the
/// destination root itself is never removed.
#[derive(Debug, Clone)]
pub struct FileSystemExecutor {
    source: PathBuf,
    destination: PathBuf,
}

impl FileSystemExecutor {
    /// Validate both roots and build an executor over their canonical paths.
    pub fn new(settings: &FolderSettings) -> Result<Self, SyncError> {
        let source = canonical_dir(&settings.source).ok_or_else(|| {
            SyncError::SourcePathDoesNotExist {
                path: settings.source.clone(),
            }
        })?;
        let destination = canonical_dir(&settings.destination).ok_or_else(|| {
            SyncError::DestinationPathDoesNotExist {
                path: settings.destination.clone(),
            }
        })?;

        if source == destination {
            return Err(SyncError::SourceAndDestinationAreEquals { path: source });
        }

        Ok(Self {
            source,
            destination,
        })
    }

    /// Canonical source root.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Canonical destination root.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Canonical roots as folder settings.
    pub fn settings(&self) -> FolderSettings {
        FolderSettings::new(&self.source, &self.destination)
    }

    /// Apply one action. Returns the number of bytes copied.
    pub fn apply(&self, action: &SyncAction) -> Result<u64, SyncError> {
        let path = action.relative_path();
        match action.kind {
            ActionKind::CreateFile | ActionKind::UpdateFile => self.create(&path),
            ActionKind::DeleteFile => self.delete(&path).map(|()| 0),
            ActionKind::CreateFolder => self.create_folder(&path).map(|()| 0),
            ActionKind::DeleteFolder => self.delete_folder(&path).map(|()| 0),
        }
    }

    /// Copy `source/path` over `destination/path`, keeping its timestamps.
    ///
    /// The destination parent must already exist.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<u64, SyncError> {
        let path = path.as_ref();
        let from = resolve_under(&self.source, path);
        let to = physical(&resolve_under(&self.destination, path));

        if to.starts_with(&self.source) {
            return Err(SyncError::BlockCopyOnSource { path: to });
        }
        if !self.is_inside_destination(&to) {
            return Err(SyncError::PathOutsideDestination { path: to });
        }

        let bytes = fs::copy(&from, &to).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Error on copy file");
            if err.kind() == ErrorKind::NotFound {
                SyncError::FileOrDirectoryNotFound {
                    path: path.to_path_buf(),
                    source: err,
                }
            } else {
                SyncError::ErrorOnCopy {
                    path: to.clone(),
                    source: err,
                }
            }
        })?;

        copy_times(&from, &to).map_err(|err| {
            tracing::warn!(path = %to.display(), error = %err, "Error preserving timestamps");
            SyncError::ErrorOnCopy {
                path: to.clone(),
                source: err,
            }
        })?;

        Ok(bytes)
    }

    /// Remove the regular file `destination/path`.
    pub fn delete(&self, path: impl AsRef<Path>) -> Result<(), SyncError> {
        let target = physical(&resolve_under(&self.destination, path));

        if !target.is_file() {
            return Err(SyncError::FileNotFoundOnDelete { path: target });
        }
        if target.starts_with(&self.source) {
            return Err(SyncError::BlockDeleteOnSource { path: target });
        }
        if !self.is_inside_destination(&target) {
            return Err(SyncError::PathOutsideDestination { path: target });
        }

        fs::remove_file(&target).map_err(|err| {
            tracing::warn!(path = %target.display(), error = %err, "Error on delete");
            SyncError::ErrorOnDelete {
                path: target.clone(),
                source: err,
            }
        })
    }

    /// Create exactly one directory level at `destination/path`.
    ///
    /// An existing entry and a missing parent are both reported as
    /// [`SyncError::ErrorOnCreateFolder`].
    pub fn create_folder(&self, path: impl AsRef<Path>) -> Result<(), SyncError> {
        let target = physical(&resolve_under(&self.destination, path));

        if target.starts_with(&self.source) {
            return Err(SyncError::BlockCreateFolderOnSource { path: target });
        }
        if !target.starts_with(&self.destination) {
            return Err(SyncError::PathOutsideDestination { path: target });
        }

        fs::create_dir(&target).map_err(|err| {
            tracing::warn!(path = %target.display(), error = %err, "Error on create folder");
            SyncError::ErrorOnCreateFolder {
                path: target.clone(),
                source: err,
            }
        })
    }

    /// Recursively remove the directory `destination/path`.
    ///
    /// A symlink to a directory is removed as a link; its target is kept.
    pub fn delete_folder(&self, path: impl AsRef<Path>) -> Result<(), SyncError> {
        let target = physical(&resolve_under(&self.destination, path));

        if !self.is_inside_destination(&target) {
            return Err(SyncError::BlockDeleteOfDestinationFolder { path: target });
        }
        if target.starts_with(&self.source) {
            return Err(SyncError::BlockDeleteOnSource { path: target });
        }
        if !target.is_dir() {
            return Err(SyncError::FolderNotFoundOnDelete { path: target });
        }

        fs::remove_dir_all(&target).map_err(|err| {
            tracing::warn!(path = %target.display(), error = %err, "Error on delete folder");
            SyncError::ErrorOnDeleteFolder {
                path: target.clone(),
                source: err,
            }
        })
    }

    /// Strictly below the destination root.
    fn is_inside_destination(&self, path: &Path) -> bool {
        path.starts_with(&self.destination) && path != self.destination
    }
}

fn canonical_dir(path: &Path) -> Option<PathBuf> {
    if !path.is_dir() {
        return None;
    }
    path.canonicalize().ok()
}

/// Resolve every symlink in the parent of `path`, keeping the last component.
///
/// The last component stays unresolved so a link can be removed as a link.
/// If the parent does not exist, `path` is returned unchanged: nothing can be
/// written or removed below a missing directory.
fn physical(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Give `to` the access and modification times of `from`.
fn copy_times(from: &Path, to: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_times(to)?.set_times(times)
}

/// Setting times only needs ownership, so a read-only copy must still work.
#[cfg(not(windows))]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(windows)]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    File::options().access_mode(FILE_WRITE_ATTRIBUTES).open(path)
}

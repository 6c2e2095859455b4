//! Size and modification time comparison.

use std::fs;
use std::path::{Path, PathBuf};

use mirrorsync_core::{ContentComparator, FolderSettings, SyncError};

/// Treats a file as changed when its size or modification time differs.
#[derive(Debug, Clone)]
pub struct MetadataComparator {
    source: PathBuf,
    destination: PathBuf,
}

impl MetadataComparator {
    /// Create a comparator over the given roots.
    pub fn new(settings: &FolderSettings) -> Self {
        Self {
            source: settings.source.clone(),
            destination: settings.destination.clone(),
        }
    }
}

impl ContentComparator for MetadataComparator {
    fn differs(&self, common_root: &str, name: &str) -> Result<bool, SyncError> {
        let (src_size, src_mtime) = size_and_mtime(&self.source.join(common_root).join(name))?;
        let (dst_size, dst_mtime) =
            size_and_mtime(&self.destination.join(common_root).join(name))?;

        let differs = src_size != dst_size || src_mtime != dst_mtime;
        tracing::debug!(common_root, name, differs, "Compared size and mtime");
        Ok(differs)
    }
}

fn size_and_mtime(path: &Path) -> Result<(u64, std::time::SystemTime), SyncError> {
    let metadata = fs::metadata(path).map_err(|e| SyncError::io(path, e))?;
    let modified = metadata.modified().map_err(|e| SyncError::io(path, e))?;
    Ok((metadata.len(), modified))
}

//! Level-by-level walk of the source tree.

use std::fs;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use jwalk::{DirEntryIter, Parallelism, WalkDir};

use mirrorsync_core::{DirectoryLevel, EntrySet, FolderSettings, SyncError};

/// Lazy pre-order walk producing one [`DirectoryLevel`] per source directory.
///
/// Only directories that exist in the source are visited. A destination-only
/// subtree never gets its own level; the planner removes it as a whole.
pub struct LevelWalker {
    source_root: PathBuf,
    destination_root: PathBuf,
    dirs: DirEntryIter<((), ())>,
    finished: bool,
}

impl LevelWalker {
    /// Start a walk over `settings.source`.
    pub fn new(settings: &FolderSettings) -> Result<Self, SyncError> {
        if !settings.source.is_dir() {
            return Err(SyncError::SourcePathDoesNotExist {
                path: settings.source.clone(),
            });
        }

        // Serial keeps the walk lazy: a directory is read only when reached.
        let dirs = WalkDir::new(&settings.source)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(0)
            .into_iter();

        Ok(Self {
            source_root: settings.source.clone(),
            destination_root: settings.destination.clone(),
            dirs,
            finished: false,
        })
    }

    /// Build the level record for one source directory.
    fn level_for(
        &self,
        common_root: CompactString,
        source_dir: &Path,
    ) -> Result<DirectoryLevel, SyncError> {
        let destination_dir = self.destination_root.join(common_root.as_str());

        let source = read_entries(source_dir)?;
        let destination = if destination_dir.is_dir() {
            read_entries(&destination_dir)?
        } else {
            EntrySet::new()
        };

        tracing::debug!(
            common_root = %common_root,
            source_entries = source.len(),
            destination_entries = destination.len(),
            "Compared directory level"
        );

        Ok(DirectoryLevel {
            common_root,
            source,
            destination,
        })
    }
}

impl Iterator for LevelWalker {
    type Item = Result<DirectoryLevel, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.dirs.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.finished = true;
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    return Some(Err(SyncError::io(path, std::io::Error::from(err))));
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let source_dir = entry.path();
            let Some(common_root) = common_root(&self.source_root, &source_dir) else {
                // Its parent level already skipped it by name.
                tracing::debug!(path = %source_dir.display(), "Skipping non UTF-8 directory");
                continue;
            };

            let level = self.level_for(common_root, &source_dir);
            if level.is_err() {
                self.finished = true;
            }
            return Some(level);
        }
    }
}

/// List the direct children of `dir` with a single directory read.
///
/// Entries are classified by what they point to, so a symlink to a
/// directory counts as a folder. Dangling links count as files. Names that
/// are not valid UTF-8 are left out with a warning; they are never synced,
/// and they do not stop the rest of the directory from syncing.
pub fn read_entries(dir: &Path) -> Result<EntrySet, SyncError> {
    let mut entries = EntrySet::new();

    let read_dir = fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| SyncError::io(dir, e))?;
        let name = match entry.file_name().into_string() {
            Ok(name) => CompactString::from(name),
            Err(raw) => {
                tracing::warn!(dir = %dir.display(), name = ?raw, "Skipping entry with non UTF-8 name");
                continue;
            }
        };

        let file_type = entry.file_type().map_err(|e| SyncError::io(entry.path(), e))?;
        let is_dir = if file_type.is_symlink() {
            fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        if is_dir {
            entries.folders.insert(name);
        } else {
            entries.files.insert(name);
        }
    }

    Ok(entries)
}

/// Strip the source root from `dir`, leaving no leading separator.
///
/// `None` when the relative path is not valid UTF-8.
fn common_root(source_root: &Path, dir: &Path) -> Option<CompactString> {
    let relative = dir.strip_prefix(source_root).unwrap_or(dir).to_str()?;
    Some(CompactString::new(
        relative.trim_start_matches(std::path::MAIN_SEPARATOR),
    ))
}

//! Per-directory snapshots produced by the tree walk.

use std::collections::BTreeSet;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Child folder and file names of one directory, read in a single listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySet {
    /// Names of child directories.
    pub folders: BTreeSet<CompactString>,
    /// Names of child files.
    pub files: BTreeSet<CompactString>,
}

impl EntrySet {
    /// Create an empty entry set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the directory had no children.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Total number of children.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}

/// One step of the source walk, paired with the matching destination listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryLevel {
    /// Path relative to both roots, without a leading separator.
    pub common_root: CompactString,
    /// Children found under the source directory.
    pub source: EntrySet,
    /// Children found under the destination directory (empty if it is missing).
    pub destination: EntrySet,
}

impl DirectoryLevel {
    /// Files present only in the source.
    pub fn files_to_create(&self) -> impl Iterator<Item = &CompactString> {
        self.source.files.difference(&self.destination.files)
    }

    /// Files present only in the destination.
    pub fn files_to_delete(&self) -> impl Iterator<Item = &CompactString> {
        self.destination.files.difference(&self.source.files)
    }

    /// Files present on both sides.
    pub fn files_to_check(&self) -> impl Iterator<Item = &CompactString> {
        self.source.files.intersection(&self.destination.files)
    }

    /// Folders present only in the source.
    pub fn folders_to_create(&self) -> impl Iterator<Item = &CompactString> {
        self.source.folders.difference(&self.destination.folders)
    }

    /// Folders present only in the destination.
    pub fn folders_to_delete(&self) -> impl Iterator<Item = &CompactString> {
        self.destination.folders.difference(&self.source.folders)
    }
}

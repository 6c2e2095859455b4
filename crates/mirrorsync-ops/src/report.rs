//! Summary of a finished sync pass.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mirrorsync_core::ActionKind;

/// Counters collected while applying the actions of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Files copied because they were missing from the destination.
    pub files_created: usize,
    /// Files copied over a differing destination copy.
    pub files_updated: usize,
    /// Files removed from the destination.
    pub files_deleted: usize,
    /// Directories created in the destination.
    pub folders_created: usize,
    /// Directories removed from the destination, contents included.
    pub folders_deleted: usize,
    /// Bytes written by file copies.
    pub bytes_copied: u64,
    /// Wall time of the pass.
    pub elapsed: Duration,
}

impl SyncReport {
    /// Count one applied action.
    pub fn record(&mut self, kind: ActionKind, bytes: u64) {
        match kind {
            ActionKind::CreateFile => self.files_created += 1,
            ActionKind::UpdateFile => self.files_updated += 1,
            ActionKind::DeleteFile => self.files_deleted += 1,
            ActionKind::CreateFolder => self.folders_created += 1,
            ActionKind::DeleteFolder => self.folders_deleted += 1,
        }
        if kind.is_copy() {
            self.bytes_copied += bytes;
        }
    }

    /// Number of actions applied.
    pub fn total_actions(&self) -> usize {
        self.files_created
            + self.files_updated
            + self.files_deleted
            + self.folders_created
            + self.folders_deleted
    }

    /// True when the trees already matched.
    pub fn is_empty(&self) -> bool {
        self.total_actions() == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted files; {} created, {} deleted folders; {} copied in {:.2?}",
            self.files_created,
            self.files_updated,
            self.files_deleted,
            self.folders_created,
            self.folders_deleted,
            humansize::format_size(self.bytes_copied, humansize::BINARY),
            self.elapsed
        )
    }
}

//! Sync action types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The kind of work a [`SyncAction`] asks for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateFile,
    UpdateFile,
    DeleteFile,
    CreateFolder,
    DeleteFolder,
}

impl ActionKind {
    /// Whether this kind resolves to a copy from source to destination.
    pub fn is_copy(self) -> bool {
        matches!(self, Self::CreateFile | Self::UpdateFile)
    }
}

/// One unit of work needed to bring the destination in line with the source.
///
/// `name` is always a direct child of `common_root`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncAction {
    /// Directory relative to both roots (`""` for the top level).
    pub common_root: CompactString,
    /// Entry name inside `common_root`.
    pub name: CompactString,
    /// What to do with the entry.
    pub kind: ActionKind,
}

impl SyncAction {
    /// Create a new action.
    pub fn new(
        common_root: impl Into<CompactString>,
        name: impl Into<CompactString>,
        kind: ActionKind,
    ) -> Self {
        Self {
            common_root: common_root.into(),
            name: name.into(),
            kind,
        }
    }

    /// Relative path of the entry (`common_root` joined with `name`).
    pub fn relative_path(&self) -> PathBuf {
        if self.common_root.is_empty() {
            PathBuf::from(self.name.as_str())
        } else {
            PathBuf::from(self.common_root.as_str()).join(self.name.as_str())
        }
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.relative_path().display())
    }
}

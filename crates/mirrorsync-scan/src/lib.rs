//! Tree comparison and action planning for mirrorsync.
//!
//! This crate turns two directory trees into a lazy stream of
//! [`SyncAction`]s:
//!
//! - [`LevelWalker`] walks the source tree in pre-order with jwalk and pairs
//!   every directory with the listing of the same relative directory in the
//!   destination.
//! - [`ActionPlanner`] turns each [`DirectoryLevel`] into create, delete and
//!   update actions, asking a [`ContentComparator`] about files found on both
//!   sides.
//!
//! # Example
//!
//! ```rust,no_run
//! use mirrorsync_core::{ContentComparator, FolderSettings, SyncError};
//! use mirrorsync_scan::{ActionPlanner, LevelWalker};
//!
//! struct AlwaysDiffers;
//!
//! impl ContentComparator for AlwaysDiffers {
//!     fn differs(&self, _root: &str, _name: &str) -> Result<bool, SyncError> {
//!         Ok(true)
//!     }
//! }
//!
//! let settings = FolderSettings::new("/srv/data", "/mnt/backup");
//! let walker = LevelWalker::new(&settings).unwrap();
//! for action in ActionPlanner::new(walker, AlwaysDiffers) {
//!     println!("{}", action.unwrap());
//! }
//! ```
//!
//! Nothing is collected across levels: the walker only reads level N+1 once
//! every action of level N has been pulled, so a caller that applies actions
//! as it goes sees its own changes on the next level.

mod planner;
mod walker;

pub use planner::ActionPlanner;
pub use walker::{LevelWalker, read_entries};

// Re-export core types for convenience
pub use mirrorsync_core::{
    ActionKind, ContentComparator, DirectoryLevel, EntrySet, FolderSettings, SyncAction,
    SyncError,
};

//! Filesystem executor and sync controller for mirrorsync.
//!
//! [`FileSystemExecutor`] applies single actions against the destination
//! and refuses anything that would touch the source tree or remove the
//! destination root. [`SyncController`] wires the walker, the planner and
//! the executor into one pass.

mod controller;
mod executor;
mod path;
mod report;

pub use controller::SyncController;
pub use executor::FileSystemExecutor;
pub use path::resolve_under;
pub use report::SyncReport;

pub use mirrorsync_core::{
    ActionKind, CompareStrategy, ErrorCategory, FolderSettings, SyncAction, SyncConfig, SyncError,
};

//! Content comparison seam used by the action planner.

use crate::SyncError;

/// Decides whether a file present in both trees must be copied again.
///
/// Implementations only read the two files; they never modify them.
pub trait ContentComparator {
    /// Returns `true` when `common_root/name` differs between source and destination.
    fn differs(&self, common_root: &str, name: &str) -> Result<bool, SyncError>;
}

impl<C: ContentComparator + ?Sized> ContentComparator for &C {
    fn differs(&self, common_root: &str, name: &str) -> Result<bool, SyncError> {
        (**self).differs(common_root, name)
    }
}

impl<C: ContentComparator + ?Sized> ContentComparator for Box<C> {
    fn differs(&self, common_root: &str, name: &str) -> Result<bool, SyncError> {
        (**self).differs(common_root, name)
    }
}
